//! Shared state handed to every task.
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use super::Selection;
use crate::config::Config;
use crate::exec::Executor;
use crate::logging::Log;
use crate::paths::PathVars;
use crate::platform::Platform;
use crate::resources::InstallOptions;

/// Run-wide switches from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Report changes without applying them.
    pub dry_run: bool,
    /// Stop at the first failing entry instead of collecting failures.
    pub fail_fast: bool,
    /// Re-point existing symlinks whose value differs from the source.
    pub relink: bool,
}

/// Shared context for task execution.
pub struct Context {
    /// Configuration for the detected platform.
    pub config: Arc<Config>,
    /// Detected (or overridden) platform.
    pub platform: Platform,
    /// Logger for output and summary recording.
    pub log: Arc<dyn Log>,
    /// Variables for target template expansion.
    pub vars: PathVars,
    /// User's home directory path.
    pub home: PathBuf,
    /// Command executor (for testing or real system calls).
    pub executor: Arc<dyn Executor>,
    /// Run-wide switches.
    pub opts: RunOptions,
    /// Entry filter from `--only` / `--skip`.
    pub selection: Selection,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("root", &self.config.root)
            .field("platform", &self.platform)
            .field("log", &"<dyn Log>")
            .field("home", &self.home)
            .field("executor", &self.executor)
            .field("opts", &self.opts)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

impl Context {
    /// Creates a new context with default options.
    ///
    /// # Errors
    ///
    /// Returns an error if `vars` has no `HOME` (or `USERPROFILE`).
    pub fn new(
        config: Config,
        platform: Platform,
        log: Arc<dyn Log>,
        vars: PathVars,
        executor: Arc<dyn Executor>,
    ) -> Result<Self> {
        let home = vars.home().ok_or_else(|| {
            anyhow::anyhow!("neither HOME nor USERPROFILE environment variable is set")
        })?;

        Ok(Self {
            config: Arc::new(config),
            platform,
            log,
            vars,
            home,
            executor,
            opts: RunOptions::default(),
            selection: Selection::default(),
        })
    }

    /// Replace the run options.
    #[must_use]
    pub const fn with_options(mut self, opts: RunOptions) -> Self {
        self.opts = opts;
        self
    }

    /// Replace the entry filter.
    #[must_use]
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Options for the symlink installer.
    #[must_use]
    pub const fn install_options(&self) -> InstallOptions {
        InstallOptions {
            relink: self.opts.relink,
        }
    }

    /// Directory link sources are relative to.
    #[must_use]
    pub fn symlinks_dir(&self) -> PathBuf {
        self.config.symlinks_dir()
    }

    /// Directory holding the stow packages.
    #[must_use]
    pub fn stow_dir(&self) -> PathBuf {
        self.config.stow_dir()
    }
}
