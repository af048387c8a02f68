//! Package-based symlink managers (GNU `stow`).
use std::path::PathBuf;
use std::sync::Arc;

use super::error::ToolError;
use crate::exec::Executor;

/// An external tool that links a directory tree as a named package.
#[cfg_attr(test, mockall::automock)]
pub trait PackageLinker: Send + Sync + std::fmt::Debug {
    /// Program name, for reporting.
    fn name(&self) -> &'static str;

    /// Whether the tool can be invoked at all.
    fn is_available(&self) -> bool;

    /// (Re)create the links for `package`.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::ExternalToolMissing`] when the tool is absent,
    /// [`ToolError::Spawn`] when it cannot be started, and
    /// [`ToolError::ExternalToolInvocationFailed`] on a non-zero exit.
    fn relink(&self, package: &str) -> Result<(), ToolError>;
}

/// [`PackageLinker`] backed by `stow --restow`.
#[derive(Debug, Clone)]
pub struct StowLinker {
    /// Directory holding one sub-directory per package.
    pub stow_dir: PathBuf,
    /// Directory the package trees are linked into (usually `$HOME`).
    pub target_dir: PathBuf,
    executor: Arc<dyn Executor>,
}

impl StowLinker {
    /// Program invoked by this linker.
    pub const PROGRAM: &'static str = "stow";

    /// Create a linker for packages under `stow_dir`, linked into `target_dir`.
    #[must_use]
    pub fn new(stow_dir: PathBuf, target_dir: PathBuf, executor: Arc<dyn Executor>) -> Self {
        Self {
            stow_dir,
            target_dir,
            executor,
        }
    }

    /// Command-line arguments for restowing `package`.
    #[must_use]
    pub fn args(&self, package: &str) -> Vec<String> {
        vec![
            "--restow".to_string(),
            "--dir".to_string(),
            self.stow_dir.to_string_lossy().into_owned(),
            "--target".to_string(),
            self.target_dir.to_string_lossy().into_owned(),
            package.to_string(),
        ]
    }
}

impl PackageLinker for StowLinker {
    fn name(&self) -> &'static str {
        Self::PROGRAM
    }

    fn is_available(&self) -> bool {
        self.executor.which(Self::PROGRAM)
    }

    fn relink(&self, package: &str) -> Result<(), ToolError> {
        if !self.is_available() {
            return Err(ToolError::ExternalToolMissing {
                tool: Self::PROGRAM.to_string(),
            });
        }

        let result = self
            .executor
            .run_unchecked(Self::PROGRAM, &self.args(package))
            .map_err(|e| ToolError::Spawn {
                tool: Self::PROGRAM.to_string(),
                source: std::io::Error::other(format!("{e:#}")),
            })?;

        if !result.success {
            return Err(ToolError::ExternalToolInvocationFailed {
                tool: Self::PROGRAM.to_string(),
                package: package.to_string(),
                exit_code: result.code.unwrap_or(-1),
                stderr: result.stderr.trim().to_string(),
            });
        }
        Ok(())
    }
}
