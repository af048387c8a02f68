//! Configuration validation producing non-fatal warnings.
use std::collections::HashSet;
use std::path::Path;

use super::links::LinkEntry;

/// A validation warning detected during configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The configuration source (e.g., "links.toml", "packages.toml").
    pub source: String,
    /// The specific item that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a new warning.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

/// Trait for configuration validators.
///
/// Validators never fail: they report problems that would make a run
/// surprising (dangling links, colliding targets) as warnings.
pub trait ConfigValidator {
    /// Validate the configuration and return any warnings found.
    fn validate(&self, root: &Path) -> Vec<ValidationWarning>;
}

/// Validator for link configurations.
#[derive(Debug)]
pub struct LinkValidator<'a> {
    links: &'a [LinkEntry],
}

impl<'a> LinkValidator<'a> {
    /// Create a validator over `links`.
    #[must_use]
    pub const fn new(links: &'a [LinkEntry]) -> Self {
        Self { links }
    }
}

impl ConfigValidator for LinkValidator<'_> {
    fn validate(&self, root: &Path) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        let symlinks_dir = root.join("symlinks");
        let mut targets = HashSet::new();

        for link in self.links {
            if Path::new(&link.source).is_absolute() {
                warnings.push(ValidationWarning::new(
                    "links.toml",
                    &link.source,
                    "source path should be relative to symlinks/ directory",
                ));
            } else {
                let source_path = symlinks_dir.join(&link.source);
                if !source_path.exists() {
                    warnings.push(ValidationWarning::new(
                        "links.toml",
                        &link.source,
                        format!("source does not exist: {}", source_path.display()),
                    ));
                }
            }

            if link.label.trim().is_empty() {
                warnings.push(ValidationWarning::new(
                    "links.toml",
                    &link.source,
                    "label is empty",
                ));
            }

            if !targets.insert(link.target.as_str()) {
                warnings.push(ValidationWarning::new(
                    "links.toml",
                    &link.label,
                    format!("target '{}' is configured more than once", link.target),
                ));
            }
        }

        warnings
    }
}

/// Validator for stow package lists.
#[derive(Debug)]
pub struct PackageValidator<'a> {
    packages: &'a [String],
}

impl<'a> PackageValidator<'a> {
    /// Create a validator over `packages`.
    #[must_use]
    pub const fn new(packages: &'a [String]) -> Self {
        Self { packages }
    }
}

impl ConfigValidator for PackageValidator<'_> {
    fn validate(&self, root: &Path) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        let stow_dir = root.join("stow");
        let mut seen = HashSet::new();

        for package in self.packages {
            if !seen.insert(package.as_str()) {
                warnings.push(ValidationWarning::new(
                    "packages.toml",
                    package,
                    "package is listed more than once",
                ));
                continue;
            }
            if !stow_dir.join(package).is_dir() {
                warnings.push(ValidationWarning::new(
                    "packages.toml",
                    package,
                    format!("no package directory under {}", stow_dir.display()),
                ));
            }
        }

        warnings
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn entry(label: &str, source: &str, target: &str) -> LinkEntry {
        LinkEntry {
            label: label.to_string(),
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    #[test]
    fn existing_sources_produce_no_warnings() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("symlinks")).unwrap();
        std::fs::write(dir.path().join("symlinks/vimrc"), "").unwrap();
        let links = vec![entry("vim", "vimrc", "~/.vimrc")];
        assert!(LinkValidator::new(&links).validate(dir.path()).is_empty());
    }

    #[test]
    fn missing_source_warns() {
        let dir = tempfile::tempdir().unwrap();
        let links = vec![entry("vim", "vimrc", "~/.vimrc")];
        let warnings = LinkValidator::new(&links).validate(dir.path());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("does not exist"));
    }

    #[test]
    fn absolute_source_warns() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("abs");
        std::fs::write(&source, "").unwrap();
        let links = vec![entry("abs", &source.to_string_lossy(), "~/.abs")];
        let warnings = LinkValidator::new(&links).validate(dir.path());
        assert!(warnings.iter().any(|w| w.message.contains("relative")));
    }

    #[test]
    fn duplicate_targets_warn() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("symlinks")).unwrap();
        std::fs::write(dir.path().join("symlinks/a"), "").unwrap();
        std::fs::write(dir.path().join("symlinks/b"), "").unwrap();
        let links = vec![entry("a", "a", "~/.x"), entry("b", "b", "~/.x")];
        let warnings = LinkValidator::new(&links).validate(dir.path());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].item, "b");
    }

    #[test]
    fn empty_label_warns() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("symlinks")).unwrap();
        std::fs::write(dir.path().join("symlinks/a"), "").unwrap();
        let links = vec![entry(" ", "a", "~/.a")];
        let warnings = LinkValidator::new(&links).validate(dir.path());
        assert!(warnings.iter().any(|w| w.message == "label is empty"));
    }

    #[test]
    fn package_checks() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("stow/nvim")).unwrap();
        let packages = vec!["nvim".to_string(), "tmux".to_string(), "nvim".to_string()];
        let warnings = PackageValidator::new(&packages).validate(dir.path());
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].item, "tmux");
        assert!(warnings[1].message.contains("more than once"));
    }
}
