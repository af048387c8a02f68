//! File-system helpers shared by resource `install()` paths.
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::error::LinkError;

/// Suffix appended to a pre-existing target before it is replaced.
pub const BACKUP_SUFFIX: &str = ".backup";

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns [`LinkError::DirectoryCreationFailed`] if the directory cannot be
/// created.
pub fn ensure_parent_dir(path: &Path) -> Result<(), LinkError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| LinkError::DirectoryCreationFailed {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Return `path` with [`BACKUP_SUFFIX`] appended to its final component.
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Sibling path used to stage a new link before it is renamed over `path`.
///
/// Kept in the same directory so the final rename never crosses a
/// filesystem boundary.
#[must_use]
pub fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "link".into(), |n| n.to_string_lossy().into_owned());
    let staged = format!(".{name}.dotlink-tmp-{}", std::process::id());
    path.with_file_name(staged)
}

/// Whether anything (including a dangling symlink) occupies `path`.
#[must_use]
pub fn is_occupied(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Compare two paths for equality, handling UNC prefix normalization on Windows.
#[must_use]
pub fn paths_equal(a: &Path, b: &Path) -> bool {
    let normalize = |p: &Path| -> PathBuf {
        #[cfg(windows)]
        {
            let s = p.to_string_lossy();
            if let Some(stripped) = s.strip_prefix(r"\\?\") {
                return PathBuf::from(stripped);
            }
        }
        p.to_path_buf()
    };

    normalize(a) == normalize(b)
}
