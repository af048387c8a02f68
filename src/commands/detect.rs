//! Command: print the detected platform.
use crate::cli::GlobalOpts;

use super::Host;

/// Text printed by the detect command: the platform tag, then the config
/// sections it activates when `verbose`.
#[must_use]
pub fn report(host: &Host, verbose: bool) -> String {
    if verbose {
        format!(
            "{}\nsections: {}",
            host.platform,
            host.platform.categories().join(", ")
        )
    } else {
        host.platform.to_string()
    }
}

/// Print the detected (or overridden) platform tag to stdout.
pub fn run(global: &GlobalOpts, verbose: bool) {
    println!("{}", report(&Host::detect(global), verbose));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Platform, WindowsFlavor};
    use std::collections::HashMap;

    fn host(platform: Platform) -> Host {
        Host {
            env: HashMap::new(),
            platform,
        }
    }

    #[test]
    fn plain_report_is_the_tag() {
        assert_eq!(report(&host(Platform::MacOs), false), "macos");
    }

    #[test]
    fn verbose_report_lists_sections() {
        insta::assert_snapshot!(
            report(&host(Platform::Windows(WindowsFlavor::Wsl)), true),
            @r"
        wsl
        sections: common, linux, wsl
        "
        );
    }
}
