//! Matching of config section names against active platform categories.

/// Whether a section applies: true when any of its categories is active.
///
/// # Examples
///
/// ```
/// use dotlink::config::category_matcher::matches;
///
/// let section = vec!["linux".to_string(), "macos".to_string()];
/// let active = vec!["common".to_string(), "macos".to_string()];
///
/// // a `[linux-macos]` section applies on either platform
/// assert!(matches(&section, &active));
/// ```
#[must_use]
pub fn matches(section_categories: &[String], active_categories: &[String]) -> bool {
    section_categories
        .iter()
        .any(|cat| active_categories.contains(cat))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn either_platform_matches() {
        let section = tags(&["linux", "macos"]);
        assert!(matches(&section, &tags(&["common", "linux"])));
        assert!(matches(&section, &tags(&["common", "macos"])));
        assert!(!matches(&section, &tags(&["common", "windows"])));
    }

    #[test]
    fn wsl_section_needs_wsl() {
        let section = tags(&["wsl"]);
        assert!(matches(&section, &tags(&["common", "linux", "wsl"])));
        assert!(!matches(&section, &tags(&["common", "linux"])));
    }

    #[test]
    fn common_matches_everywhere() {
        let section = tags(&["common"]);
        assert!(matches(&section, &tags(&["common"])));
        assert!(matches(&section, &tags(&["common", "windows"])));
    }

    #[test]
    fn empty_section_never_matches() {
        assert!(!matches(&[], &tags(&["common"])));
    }
}
