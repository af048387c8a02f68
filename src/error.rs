//! Domain-specific error types for the linker.
//!
//! Internal modules return typed errors built with [`thiserror`], and the
//! command handlers at the CLI boundary convert them to [`anyhow::Error`]
//! via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! DotlinkError
//! ├── Config(ConfigError)     : TOML loading, root resolution, path templates
//! ├── Link(LinkError)         : directory creation, backup, symlink creation
//! ├── Tool(ToolError)         : external package linker (stow)
//! └── Platform(PlatformError): platform tag parsing
//! ```

use std::path::PathBuf;

use thiserror::Error;

pub use crate::resources::error::{LinkError, ToolError};

/// Top-level error type for the linker.
///
/// Aggregates the per-layer errors and is convertible to [`anyhow::Error`]
/// for use at CLI command boundaries.
#[derive(Error, Debug)]
pub enum DotlinkError {
    /// Configuration-related error (parsing, root resolution, templates).
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A symlink could not be installed.
    #[error("Link error: {0}")]
    Link(#[from] LinkError),

    /// The external package linker failed.
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    /// Platform tag could not be interpreted.
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
}

/// Errors that arise from configuration loading and path templating.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A config file could not be read.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A config file is not valid TOML or does not match the expected shape.
    #[error("Invalid TOML in {path}: {message}")]
    Parse {
        /// Path to the offending file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// A target template references a variable that is not defined.
    #[error("Unknown variable '${var}' in '{template}'")]
    UnknownVariable {
        /// The variable name, without the leading `$`.
        var: String,
        /// The template being expanded.
        template: String,
    },

    /// An explicitly requested root directory does not exist.
    #[error("dotfiles root {path} does not exist")]
    RootMissing {
        /// The requested root.
        path: PathBuf,
    },

    /// No dotfiles root could be located.
    #[error("cannot determine dotfiles root. Use --root or set DOTLINK_ROOT")]
    RootNotFound,
}

/// Errors that arise from platform handling.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The given string is not a known platform tag.
    #[error("unknown platform '{0}': expected one of macos, linux, windows, wsl, unknown")]
    UnknownTag(String),
}
