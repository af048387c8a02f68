//! Core logging types: summary entries, status, and the [`Log`] trait.

/// One line of the run summary.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Human-readable name (link label, package name, or step name).
    pub name: String,
    /// Final status.
    pub status: TaskStatus,
    /// Optional detail message (e.g., skip reason or error description).
    pub message: Option<String>,
}

/// Status of a completed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Changes were applied.
    Ok,
    /// Nothing to do; the desired state was already present.
    Unchanged,
    /// Explicitly skipped (e.g., tool not found, filtered out).
    Skipped,
    /// Dry-run mode; the change was only reported.
    DryRun,
    /// Could not complete.
    Failed,
}

impl TaskStatus {
    /// Summary icon and ANSI color for this status.
    #[must_use]
    pub const fn style(self) -> (&'static str, &'static str) {
        match self {
            Self::Ok => ("✓", "\x1b[32m"),
            Self::Unchanged => ("·", "\x1b[2m"),
            Self::Skipped => ("○", "\x1b[33m"),
            Self::DryRun => ("~", "\x1b[37m"),
            Self::Failed => ("✗", "\x1b[31m"),
        }
    }
}

/// Abstraction over logging backends.
///
/// Task code logs through this trait so tests can substitute a recorder.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record an entry for the summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);
}
