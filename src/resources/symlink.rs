//! Symlink installer with backup-on-conflict.
//!
//! [`install`] makes `target` a symbolic link to `source`:
//!
//! - an existing symlink is left alone ([`LinkOutcome::AlreadyLinked`]),
//!   unless strict mode asks for it to be re-pointed;
//! - any other existing node is preserved as `<target>.backup` first;
//! - the new link is staged at a sibling path and renamed into place, so the
//!   target path is never observed empty for regular-file conflicts.
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use super::error::LinkError;
use super::fs::{backup_path, ensure_parent_dir, is_occupied, paths_equal, staging_path};

/// One link to install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRequest {
    /// What the link points at (owned by the dotfiles store).
    pub source: PathBuf,
    /// Where the link appears.
    pub target: PathBuf,
    /// Display name, used for reporting only.
    pub label: String,
}

impl LinkRequest {
    /// Create a new request.
    #[must_use]
    pub fn new(
        source: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            label: label.into(),
        }
    }

    /// Human-readable description of this link.
    #[must_use]
    pub fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.source.display())
    }
}

/// What [`install`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Nothing existed at the target; the link was created.
    Linked,
    /// A non-symlink node was moved to `<target>.backup`, then linked.
    BackedUpAndLinked,
    /// The target already was a symlink; nothing changed.
    AlreadyLinked,
    /// Strict mode replaced a symlink that pointed elsewhere.
    Relinked,
}

impl LinkOutcome {
    /// Whether the filesystem was modified.
    #[must_use]
    pub const fn changed(self) -> bool {
        !matches!(self, Self::AlreadyLinked)
    }
}

impl fmt::Display for LinkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linked => write!(f, "linked"),
            Self::BackedUpAndLinked => write!(f, "backed up and linked"),
            Self::AlreadyLinked => write!(f, "already linked"),
            Self::Relinked => write!(f, "relinked"),
        }
    }
}

/// What [`install`] would do, as reported by [`plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkPlan {
    /// Nothing at the target: create the link.
    Create,
    /// A non-symlink node is in the way: back it up, then link.
    BackupAndCreate,
    /// A symlink is already there and will be kept.
    Keep {
        /// Current value of the existing link.
        points_to: PathBuf,
    },
    /// A symlink pointing elsewhere will be replaced (strict mode only).
    Replace {
        /// Current value of the existing link.
        points_to: PathBuf,
    },
}

/// Behaviour switches for [`install`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallOptions {
    /// Re-point existing symlinks whose value differs from the source.
    ///
    /// Off by default: any existing symlink counts as installed.
    pub relink: bool,
}

/// Current state of the target, inspected without following links.
enum Existing {
    Nothing,
    Symlink(PathBuf),
    Node { is_dir: bool },
}

fn inspect(target: &Path) -> Result<Existing, LinkError> {
    let inspect_err = |source| LinkError::Inspect {
        path: target.to_path_buf(),
        source,
    };
    match std::fs::symlink_metadata(target) {
        Ok(meta) if meta.file_type().is_symlink() => std::fs::read_link(target)
            .map(Existing::Symlink)
            .map_err(inspect_err),
        Ok(meta) => Ok(Existing::Node {
            is_dir: meta.is_dir(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Existing::Nothing),
        Err(e) => Err(inspect_err(e)),
    }
}

/// Report what [`install`] would do without touching the filesystem.
///
/// # Errors
///
/// Returns [`LinkError::Inspect`] if the target cannot be examined.
pub fn plan(request: &LinkRequest, options: InstallOptions) -> Result<LinkPlan, LinkError> {
    Ok(match inspect(&request.target)? {
        Existing::Nothing => LinkPlan::Create,
        Existing::Node { .. } => LinkPlan::BackupAndCreate,
        Existing::Symlink(points_to) => {
            if options.relink && !paths_equal(&points_to, &request.source) {
                LinkPlan::Replace { points_to }
            } else {
                LinkPlan::Keep { points_to }
            }
        }
    })
}

/// Ensure `request.target` is a symlink to `request.source`.
///
/// The source is not checked for existence; a missing source yields a
/// dangling link.
///
/// # Errors
///
/// - [`LinkError::DirectoryCreationFailed`] if the parent chain cannot be created.
/// - [`LinkError::BackupFailed`] if `<target>.backup` is already occupied or the
///   existing node cannot be moved there.
/// - [`LinkError::LinkCreationFailed`] if the link cannot be created or moved
///   into place.
/// - [`LinkError::Inspect`] if the target cannot be examined.
pub fn install(request: &LinkRequest, options: InstallOptions) -> Result<LinkOutcome, LinkError> {
    let LinkRequest { source, target, .. } = request;
    ensure_parent_dir(target)?;

    match inspect(target)? {
        Existing::Nothing => {
            create_symlink(source, target).map_err(|e| link_failed(request, e))?;
            Ok(LinkOutcome::Linked)
        }
        Existing::Symlink(current) => {
            if !options.relink || paths_equal(&current, source) {
                return Ok(LinkOutcome::AlreadyLinked);
            }
            let staged = stage_link(request)?;
            std::fs::rename(&staged, target).map_err(|e| {
                discard(&staged);
                link_failed(request, e)
            })?;
            Ok(LinkOutcome::Relinked)
        }
        Existing::Node { is_dir } => {
            backup_and_link(request, is_dir)?;
            Ok(LinkOutcome::BackedUpAndLinked)
        }
    }
}

/// Move the existing node to its backup slot and rename the staged link
/// over the target.
///
/// Non-directories are hard-linked into the backup slot so the target keeps
/// its original content until the final rename replaces it atomically.
/// Directories (and filesystems without hard links) fall back to a rename.
fn backup_and_link(request: &LinkRequest, is_dir: bool) -> Result<(), LinkError> {
    backup_and_commit(request, is_dir, |staged, target| std::fs::rename(staged, target))
}

/// [`backup_and_link`] with the final `staged -> target` rename supplied by
/// the caller. If `commit` fails the original node is put back.
fn backup_and_commit(
    request: &LinkRequest,
    is_dir: bool,
    commit: impl FnOnce(&Path, &Path) -> io::Result<()>,
) -> Result<(), LinkError> {
    let target = &request.target;
    let backup = backup_path(target);
    let backup_failed = |source| LinkError::BackupFailed {
        path: target.clone(),
        backup: backup.clone(),
        source,
    };

    if is_occupied(&backup) {
        return Err(backup_failed(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "backup already exists",
        )));
    }

    let staged = stage_link(request)?;

    let hard_linked = !is_dir && std::fs::hard_link(target, &backup).is_ok();
    if !hard_linked
        && let Err(e) = std::fs::rename(target, &backup)
    {
        discard(&staged);
        return Err(backup_failed(e));
    }

    if let Err(e) = commit(&staged, target) {
        discard(&staged);
        let restored = if hard_linked {
            std::fs::remove_file(&backup)
        } else {
            std::fs::rename(&backup, target)
        };
        let e = match restored {
            Ok(()) => e,
            Err(restore) => io::Error::new(
                e.kind(),
                format!(
                    "{e}; original left at {} ({restore})",
                    backup.display()
                ),
            ),
        };
        return Err(link_failed(request, e));
    }
    Ok(())
}

/// Create the new link at a sibling staging path.
fn stage_link(request: &LinkRequest) -> Result<PathBuf, LinkError> {
    let staged = staging_path(&request.target);
    if is_occupied(&staged) {
        discard(&staged);
    }
    create_symlink(&request.source, &staged).map_err(|e| link_failed(request, e))?;
    Ok(staged)
}

fn discard(staged: &Path) {
    let _ = std::fs::remove_file(staged);
}

fn link_failed(request: &LinkRequest, source: io::Error) -> LinkError {
    LinkError::LinkCreationFailed {
        target: request.target.clone(),
        source_path: request.source.clone(),
        source,
    }
}

/// Create a symlink at `link` pointing to `source`.
fn create_symlink(source: &Path, link: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(source, link)
    }

    #[cfg(windows)]
    {
        if source.is_dir() {
            std::os::windows::fs::symlink_dir(source, link)
        } else {
            std::os::windows::fs::symlink_file(source, link)
        }
    }

    #[cfg(not(any(unix, windows)))]
    {
        let _ = (source, link);
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "symlinks are not supported on this platform",
        ))
    }
}
