//! Typed error variants for resource operations.
//!
//! [`LinkError`] covers the symlink installer and [`ToolError`] covers the
//! external package linker.  Callers convert to [`anyhow::Error`] via `?`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while installing a single symlink.
#[derive(Error, Debug)]
pub enum LinkError {
    /// The parent directory chain of the target could not be created.
    #[error("cannot create directory {path}: {source}")]
    DirectoryCreationFailed {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The pre-existing target could not be moved to its backup slot.
    #[error("cannot back up {path} to {backup}: {source}")]
    BackupFailed {
        /// The existing target.
        path: PathBuf,
        /// The backup slot (`<target>.backup`).
        backup: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The symlink itself could not be created or moved into place.
    #[error("cannot link {target} -> {source_path}: {source}")]
    LinkCreationFailed {
        /// Where the link should have appeared.
        target: PathBuf,
        /// What the link should have pointed at.
        source_path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The target could not be inspected.
    #[error("cannot inspect {path}: {source}")]
    Inspect {
        /// The path being inspected.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors raised by an external package linker such as `stow`.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The tool is not installed or not on `PATH`.
    #[error("{tool} not found on PATH")]
    ExternalToolMissing {
        /// Name of the missing program.
        tool: String,
    },

    /// The tool ran but exited unsuccessfully.
    #[error("{tool} failed for package '{package}' (exit {exit_code}): {stderr}")]
    ExternalToolInvocationFailed {
        /// Name of the program.
        tool: String,
        /// Package being linked.
        package: String,
        /// Exit code, `-1` when killed by a signal.
        exit_code: i32,
        /// Captured standard error output.
        stderr: String,
    },

    /// The tool could not be started at all.
    #[error("failed to execute {tool}: {source}")]
    Spawn {
        /// Name of the program.
        tool: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl ToolError {
    /// Whether this error should be downgraded to a warning and a skip.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::ExternalToolMissing { .. })
    }
}
