//! TOML configuration file parsing with platform-category filtering.
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::Path;

use super::category_matcher::matches;
use crate::error::ConfigError;

/// Deserialize a TOML file, treating a missing file as empty.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file exists but cannot be read, or
/// [`ConfigError::Parse`] if it is not valid for `T`.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = if path.exists() {
        std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        String::new()
    };

    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })
}

/// Load a TOML config file where each top-level table holds a single
/// repeated field, returning `(section_name, items)` pairs in section-name
/// order.
///
/// `extract` receives the deserialized section and returns the `Vec<T>`
/// stored inside it (e.g. `|s: PackageSection| s.packages`).
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_section_items<S, T>(
    path: &Path,
    extract: impl Fn(S) -> Vec<T>,
) -> Result<Vec<(String, Vec<T>)>, ConfigError>
where
    S: DeserializeOwned,
{
    let config: BTreeMap<String, S> = load_config(path)?;
    Ok(config.into_iter().map(|(k, v)| (k, extract(v))).collect())
}

/// Keep the items of sections whose `-`-separated name shares a category
/// with the active ones.
#[must_use]
pub fn filter_by_categories<T>(
    items: Vec<(String, Vec<T>)>,
    active_categories: &[String],
) -> Vec<T> {
    items
        .into_iter()
        .filter(|(section_name, _)| {
            let categories: Vec<String> = section_name
                .split('-')
                .map(|c| c.trim().to_ascii_lowercase())
                .collect();
            matches(&categories, active_categories)
        })
        .flat_map(|(_, items)| items)
        .collect()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::test_helpers::write_temp_toml;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Section {
        items: Vec<String>,
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let items =
            load_section_items(&dir.path().join("absent.toml"), |s: Section| s.items).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn sections_come_back_sorted() {
        let (_dir, path) = write_temp_toml(
            "[zeta]\nitems = [\"z\"]\n\n[alpha]\nitems = [\"a\"]\n",
        );
        let items = load_section_items(&path, |s: Section| s.items).unwrap();
        assert_eq!(items[0].0, "alpha");
        assert_eq!(items[1].0, "zeta");
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let (_dir, path) = write_temp_toml("[common\nitems = ");
        let err = load_section_items(&path, |s: Section| s.items).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "got {err:?}");
    }

    #[test]
    fn wrong_shape_is_a_parse_error() {
        let (_dir, path) = write_temp_toml("[common]\nitems = 3\n");
        assert!(load_section_items(&path, |s: Section| s.items).is_err());
    }

    #[test]
    fn filter_uses_dash_separated_categories() {
        let items = vec![
            ("common".to_string(), vec![1]),
            ("linux-macos".to_string(), vec![2]),
            ("windows".to_string(), vec![3]),
        ];
        let active = vec!["common".to_string(), "macos".to_string()];
        assert_eq!(filter_by_categories(items, &active), vec![1, 2]);
    }
}
