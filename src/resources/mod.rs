//! Idempotent filesystem primitives: the symlink installer and the
//! package linker it sits beside.
//!
//! The installer ([`symlink`]) never depends on the package linker
//! ([`package`]); the two are alternative ways a task can materialise links.
pub mod error;
pub mod fs;
pub mod package;
pub mod symlink;

pub use error::{LinkError, ToolError};
pub use package::{PackageLinker, StowLinker};
pub use symlink::{InstallOptions, LinkOutcome, LinkPlan, LinkRequest, install, plan};
