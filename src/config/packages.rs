//! Stow package list loading (`conf/packages.toml`).
use serde::Deserialize;
use std::path::Path;

use super::toml_loader;
use crate::error::ConfigError;

/// TOML section containing package names.
#[derive(Debug, Deserialize)]
struct PackageSection {
    #[serde(default)]
    packages: Vec<String>,
}

/// Load package names from `packages.toml`, keeping sections that match any
/// active category.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load(path: &Path, active_categories: &[String]) -> Result<Vec<String>, ConfigError> {
    let items = toml_loader::load_section_items(path, |s: PackageSection| s.packages)?;
    Ok(toml_loader::filter_by_categories(items, active_categories))
}
