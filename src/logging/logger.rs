//! Structured logger with dry-run awareness and summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::types::{Log, TaskEntry, TaskStatus};
use super::utils::log_file_path;

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Per-status totals for the run summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SummaryCounts {
    /// Entries that applied changes.
    pub ok: usize,
    /// Entries already in the desired state.
    pub unchanged: usize,
    /// Entries that were skipped.
    pub skipped: usize,
    /// Entries only reported in dry-run mode.
    pub dry_run: usize,
    /// Entries that failed.
    pub failed: usize,
}

impl SummaryCounts {
    /// Tally `entries` by status.
    #[must_use]
    pub fn from_entries(entries: &[TaskEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut acc, entry| {
            match entry.status {
                TaskStatus::Ok => acc.ok += 1,
                TaskStatus::Unchanged => acc.unchanged += 1,
                TaskStatus::Skipped => acc.skipped += 1,
                TaskStatus::DryRun => acc.dry_run += 1,
                TaskStatus::Failed => acc.failed += 1,
            }
            acc
        })
    }

    /// Total number of entries.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.ok + self.unchanged + self.skipped + self.dry_run + self.failed
    }

    /// One-line totals without color codes.
    #[must_use]
    pub fn plain_line(&self) -> String {
        format!(
            "{} entries: {} ok, {} unchanged, {} skipped, {} dry-run, {} failed",
            self.total(),
            self.ok,
            self.unchanged,
            self.skipped,
            self.dry_run,
            self.failed
        )
    }
}

/// Structured logger with dry-run awareness and summary collection.
///
/// All messages are also appended to `$XDG_CACHE_HOME/dotlink/<command>.log`
/// (default `~/.cache/dotlink/<command>.log`) by the file layer installed in
/// [`init_subscriber`](super::subscriber::init_subscriber).
#[derive(Debug)]
pub struct Logger {
    tasks: Mutex<Vec<TaskEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// Stores the log file path for display in the run summary; this
    /// constructor does not write to the file.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a clone of all recorded entries.
    #[must_use]
    pub fn task_entries(&self) -> Vec<TaskEntry> {
        self.tasks.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "dotlink::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: "dotlink::dry_run", "{msg}");
    }

    /// Record an entry for the summary.
    pub fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.tasks.lock() {
            guard.push(TaskEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Return `true` if any recorded entry has failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Count the number of failed entries.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.tasks.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|t| t.status == TaskStatus::Failed)
                .count()
        })
    }

    /// Totals over everything recorded so far.
    #[must_use]
    pub fn counts(&self) -> SummaryCounts {
        self.tasks
            .lock()
            .map_or_else(|_| SummaryCounts::default(), |g| SummaryCounts::from_entries(&g))
    }

    /// Print the summary of all recorded entries.
    pub fn print_summary(&self) {
        let tasks = self.task_entries();
        if tasks.is_empty() {
            return;
        }

        self.stage("Summary");
        for task in &tasks {
            let (icon, color) = task.status.style();
            let suffix = task
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));
            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", task.name));
        }

        let counts = SummaryCounts::from_entries(&tasks);
        self.info(&format!(
            "{} entries: \x1b[32m{} ok\x1b[0m, \x1b[2m{} unchanged\x1b[0m, \x1b[33m{} skipped\x1b[0m, \x1b[37m{} dry-run\x1b[0m, \x1b[31m{} failed\x1b[0m",
            counts.total(),
            counts.ok,
            counts.unchanged,
            counts.skipped,
            counts.dry_run,
            counts.failed
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);

    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        self.record_task(name, status, message);
    }
}
