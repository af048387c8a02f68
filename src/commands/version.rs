//! Command: print version information.

/// Version string embedded at build time, or the crate version for
/// development builds.
#[must_use]
pub fn version() -> &'static str {
    option_env!("DOTLINK_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")))
}

/// Print the version to stdout.
pub fn run() {
    println!("dotlink {}", version());
}

#[cfg(test)]
mod tests {
    #[test]
    fn version_is_not_empty() {
        assert!(!super::version().is_empty());
    }
}
