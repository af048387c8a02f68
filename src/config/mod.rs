//! Configuration loading: which links and stow packages apply to the
//! current platform.
//!
//! Every file lives under `<root>/conf/` and is optional.  Each top-level
//! TOML table is a section named by `-`-joined platform categories; a
//! section applies when any of its categories is active.
pub mod category_matcher;
pub mod links;
pub mod packages;
pub mod toml_loader;
pub mod validation;

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::platform::Platform;
use validation::{ConfigValidator as _, LinkValidator, PackageValidator, ValidationWarning};

/// All loaded configuration for one platform.
#[derive(Debug, Clone)]
pub struct Config {
    /// Dotfiles root directory.
    pub root: PathBuf,
    /// Links to install manually.
    pub links: Vec<links::LinkEntry>,
    /// Packages to hand to the package linker.
    pub packages: Vec<String>,
}

impl Config {
    /// Load all configuration that applies to `platform`.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration file exists but cannot be read
    /// or parsed.
    pub fn load(root: &Path, platform: Platform) -> Result<Self, ConfigError> {
        let conf = root.join("conf");
        let active = platform.categories();

        let links = links::load(&conf.join("links.toml"), &active)?;
        let packages = packages::load(&conf.join("packages.toml"), &active)?;

        Ok(Self {
            root: root.to_path_buf(),
            links,
            packages,
        })
    }

    /// Directory that link sources are relative to.
    #[must_use]
    pub fn symlinks_dir(&self) -> PathBuf {
        self.root.join("symlinks")
    }

    /// Directory holding one sub-directory per stow package.
    #[must_use]
    pub fn stow_dir(&self) -> PathBuf {
        self.root.join("stow")
    }

    /// Run every validator and collect the warnings.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationWarning> {
        let mut warnings = LinkValidator::new(&self.links).validate(&self.root);
        warnings.extend(PackageValidator::new(&self.packages).validate(&self.root));
        warnings
    }
}
