//! Command: install a single link without a configuration file.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};

use super::{Host, build_context, run_tasks_to_completion};
use crate::cli::{GlobalOpts, LinkOpts};
use crate::config::Config;
use crate::config::links::LinkEntry;
use crate::logging::Logger;
use crate::tasks::Task;
use crate::tasks::links::InstallLinks;

/// Turn the command-line arguments into a link entry.
///
/// A relative source is made absolute against `cwd`; the target stays a
/// template so `~` and `$VAR` are expanded like configured entries.  The
/// label defaults to the target's file name.
#[must_use]
pub fn entry_from_args(opts: &LinkOpts, cwd: &Path) -> LinkEntry {
    let source = if opts.source.is_absolute() {
        opts.source.clone()
    } else {
        cwd.join(&opts.source)
    };
    let label = opts.label.clone().unwrap_or_else(|| {
        Path::new(&opts.target)
            .file_name()
            .map_or_else(|| opts.target.clone(), |n| n.to_string_lossy().into_owned())
    });

    LinkEntry {
        label,
        source: source.to_string_lossy().into_owned(),
        target: opts.target.clone(),
    }
}

/// Run the link command.
///
/// # Errors
///
/// Returns an error if the target template cannot be expanded or the link
/// cannot be installed.
pub fn run(global: &GlobalOpts, opts: &LinkOpts, log: &Arc<Logger>) -> Result<()> {
    let cwd: PathBuf = std::env::current_dir().context("reading current directory")?;
    let host = Host::detect(global);
    let config = Config {
        root: cwd.clone(),
        links: vec![entry_from_args(opts, &cwd)],
        packages: vec![],
    };
    let ctx = build_context(global, &host, config, log, opts.relink)?;
    let tasks: [&dyn Task; 1] = [&InstallLinks];

    run_tasks_to_completion(&tasks, &ctx, log)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn opts(source: &str, target: &str, label: Option<&str>) -> LinkOpts {
        LinkOpts {
            source: PathBuf::from(source),
            target: target.to_string(),
            label: label.map(String::from),
            relink: false,
        }
    }

    #[test]
    fn relative_source_is_made_absolute() {
        let entry = entry_from_args(&opts("vimrc", "~/.vimrc", None), Path::new("/dots"));
        assert_eq!(entry.source, "/dots/vimrc");
        assert_eq!(entry.target, "~/.vimrc");
    }

    #[test]
    fn label_defaults_to_target_file_name() {
        let entry = entry_from_args(
            &opts("/dots/nvim/init.vim", "$XDG_CONFIG_HOME/nvim/init.vim", None),
            Path::new("/"),
        );
        assert_eq!(entry.label, "init.vim");
        assert_eq!(entry.source, "/dots/nvim/init.vim");
    }

    #[test]
    fn explicit_label_wins() {
        let entry = entry_from_args(&opts("a", "~/.a", Some("alpha")), Path::new("/dots"));
        assert_eq!(entry.label, "alpha");
    }
}
