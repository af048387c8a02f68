//! Dotfiles linker.
//!
//! Links files from a central dotfiles directory into per-platform target
//! locations. Anything already in the way is preserved as `<target>.backup`,
//! and re-running is a no-op. Whole directory trees can instead be handed to
//! GNU `stow` as named packages.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: load and validate the TOML link and package lists
//! - **[`resources`]**: the idempotent symlink installer and the package linker
//! - **[`tasks`]**: named units of work wired to resources, with summary recording
//! - **[`commands`]**: top-level subcommand orchestration (`install`, `stow`, `link`, …)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod paths;
pub mod platform;
pub mod resources;
pub mod tasks;
