//! Named units of work that drive the resource layer and record results.
pub mod context;
pub mod links;
pub mod stow;

pub use context::{Context, RunOptions};

use anyhow::Result;

use crate::logging::TaskStatus;

/// Result of a task execution.
///
/// # Examples
///
/// ```
/// use dotlink::tasks::TaskResult;
///
/// let skipped = TaskResult::Skipped("stow not found".to_string());
/// assert!(matches!(skipped, TaskResult::Skipped(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// Task completed; individual entries were recorded as they ran.
    Ok,
    /// Task was skipped as a whole.
    Skipped(String),
    /// Task ran in dry-run mode.
    DryRun,
}

/// Counters for tasks that process many entries.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    /// Entries changed (or that would change in dry-run mode).
    pub changed: u32,
    /// Entries already in the desired state.
    pub already_ok: u32,
    /// Entries filtered out or skipped.
    pub skipped: u32,
    /// Entries that failed.
    pub failed: u32,
}

impl TaskStats {
    /// Create a new empty counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Format the one-line summary.
    ///
    /// # Examples
    ///
    /// ```
    /// use dotlink::tasks::TaskStats;
    ///
    /// let stats = TaskStats { changed: 2, already_ok: 5, skipped: 0, failed: 0 };
    /// assert_eq!(stats.summary(false), "2 changed, 5 already ok");
    /// assert_eq!(stats.summary(true), "2 would change, 5 already ok");
    /// ```
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would change" } else { "changed" };
        let mut line = format!("{} {verb}, {} already ok", self.changed, self.already_ok);
        if self.skipped > 0 {
            line.push_str(&format!(", {} skipped", self.skipped));
        }
        if self.failed > 0 {
            line.push_str(&format!(", {} failed", self.failed));
        }
        line
    }

    /// Log the summary and return the matching [`TaskResult`].
    #[must_use]
    pub fn finish(self, ctx: &Context) -> TaskResult {
        ctx.log.info(&self.summary(ctx.opts.dry_run));
        if ctx.opts.dry_run {
            TaskResult::DryRun
        } else {
            TaskResult::Ok
        }
    }
}

/// `--only` / `--skip` entry filter, matched case-insensitively against
/// link labels and package names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// When non-empty, only these entries run.
    pub only: Vec<String>,
    /// Entries that never run.
    pub skip: Vec<String>,
}

impl Selection {
    /// Whether the entry called `name` is selected.
    ///
    /// # Examples
    ///
    /// ```
    /// use dotlink::tasks::Selection;
    ///
    /// let sel = Selection { only: vec!["nvim".into()], skip: vec![] };
    /// assert!(sel.allows("NVIM"));
    /// assert!(!sel.allows("tmux"));
    /// ```
    #[must_use]
    pub fn allows(&self, name: &str) -> bool {
        let matches = |list: &[String]| list.iter().any(|n| n.eq_ignore_ascii_case(name));
        if !self.only.is_empty() && !matches(&self.only) {
            return false;
        }
        !matches(&self.skip)
    }
}

/// A named, executable task.
pub trait Task {
    /// Human-readable task name.
    fn name(&self) -> &str;

    /// Whether this task has anything to do.
    fn should_run(&self, ctx: &Context) -> bool;

    /// Execute the task.
    ///
    /// Per-entry results are recorded by the task itself; an `Err` means
    /// the task stopped early.
    ///
    /// # Errors
    ///
    /// Returns an error when the task cannot continue, or on the first
    /// failing entry when fail-fast is enabled.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// Execute a task, recording task-level outcomes in the logger.
pub fn execute(task: &dyn Task, ctx: &Context) {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping task: {} (nothing to do)", task.name()));
        return;
    }

    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok | TaskResult::DryRun) => {}
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", task.name()));
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&format!("{e:#}")));
        }
    }
}


#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use test_helpers::{config, make_context};

    struct MockTask {
        should_run: bool,
        result: Result<TaskResult, String>,
    }

    impl Task for MockTask {
        fn name(&self) -> &'static str {
            "mock"
        }
        fn should_run(&self, _ctx: &Context) -> bool {
            self.should_run
        }
        fn run(&self, _ctx: &Context) -> Result<TaskResult> {
            self.result.clone().map_err(|s| anyhow::anyhow!("{s}"))
        }
    }

    fn ctx() -> (Context, std::sync::Arc<test_helpers::RecordingLog>) {
        make_context(
            config(PathBuf::from("/dotfiles"), vec![], &[]),
            &PathBuf::from("/home/test"),
            RunOptions::default(),
        )
    }

    #[test]
    fn execute_ignores_task_with_nothing_to_do() {
        let (ctx, log) = ctx();
        execute(
            &MockTask {
                should_run: false,
                result: Err("never runs".into()),
            },
            &ctx,
        );
        assert!(log.entries.lock().unwrap().is_empty());
        assert!(!log.logged("stage", "mock"));
    }

    #[test]
    fn execute_records_skipped_task() {
        let (ctx, log) = ctx();
        execute(
            &MockTask {
                should_run: true,
                result: Ok(TaskResult::Skipped("stow not found".into())),
            },
            &ctx,
        );
        let skipped = log.with_status(TaskStatus::Skipped);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].message.as_deref(), Some("stow not found"));
    }

    #[test]
    fn execute_records_failed_task() {
        let (ctx, log) = ctx();
        execute(
            &MockTask {
                should_run: true,
                result: Err("kaboom".into()),
            },
            &ctx,
        );
        assert_eq!(log.with_status(TaskStatus::Failed).len(), 1);
        assert!(log.logged("error", "kaboom"));
    }

    #[test]
    fn execute_records_nothing_for_ok_task() {
        let (ctx, log) = ctx();
        execute(
            &MockTask {
                should_run: true,
                result: Ok(TaskResult::Ok),
            },
            &ctx,
        );
        assert!(log.entries.lock().unwrap().is_empty());
    }

    #[test]
    fn summary_mentions_failures() {
        let stats = TaskStats {
            changed: 1,
            already_ok: 0,
            skipped: 2,
            failed: 1,
        };
        assert_eq!(
            stats.summary(false),
            "1 changed, 0 already ok, 2 skipped, 1 failed"
        );
    }

    #[test]
    fn selection_skip_wins() {
        let sel = Selection {
            only: vec!["nvim".into()],
            skip: vec!["nvim".into()],
        };
        assert!(!sel.allows("nvim"));
        assert!(Selection::default().allows("anything"));
    }
}
