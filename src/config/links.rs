//! Link configuration loading (`conf/links.toml`).
use serde::Deserialize;
use std::path::Path;

use super::toml_loader;
use crate::error::ConfigError;

/// A configured link: source (under `symlinks/`) → target template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    /// Display name.
    pub label: String,
    /// Path relative to the `symlinks/` directory (or absolute).
    pub source: String,
    /// Target template, expanded with [`PathVars`](crate::paths::PathVars).
    pub target: String,
}

impl LinkEntry {
    /// Target derived by convention for a plain entry: `~/.<source>`.
    #[must_use]
    pub fn conventional_target(source: &str) -> String {
        format!("~/.{}", source.trim_start_matches('.'))
    }
}

/// A single entry in a links section: either a plain source path or a
/// structured table.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    /// `"tmux.conf"`: label is the source, target is `~/.tmux.conf`.
    Simple(String),
    /// `{ label = "nvim", source = "nvim/init.vim", target = "..." }`.
    Full {
        label: Option<String>,
        source: String,
        target: Option<String>,
    },
}

impl From<RawEntry> for LinkEntry {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Simple(source) => Self {
                label: source.clone(),
                target: Self::conventional_target(&source),
                source,
            },
            RawEntry::Full {
                label,
                source,
                target,
            } => Self {
                label: label.unwrap_or_else(|| source.clone()),
                target: target.unwrap_or_else(|| Self::conventional_target(&source)),
                source,
            },
        }
    }
}

/// TOML section containing links.
#[derive(Debug, Deserialize)]
struct LinkSection {
    #[serde(default)]
    links: Vec<RawEntry>,
}

/// Load links from `links.toml`, keeping sections that match any active
/// category.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load(path: &Path, active_categories: &[String]) -> Result<Vec<LinkEntry>, ConfigError> {
    let items = toml_loader::load_section_items(path, |s: LinkSection| s.links)?;
    Ok(
        toml_loader::filter_by_categories(items, active_categories)
            .into_iter()
            .map(LinkEntry::from)
            .collect(),
    )
}
