//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::platform::Platform;

/// Top-level CLI entry point for the dotfiles linker.
#[derive(Parser, Debug)]
#[command(
    name = "dotlink",
    about = "Link dotfiles into place, backing up whatever is in the way",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Override dotfiles root directory
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Override platform detection (macos, linux, windows, wsl, unknown)
    #[arg(long, global = true)]
    pub platform: Option<Platform>,

    /// Stop at the first failure instead of reporting all failures at the end
    #[arg(long, global = true)]
    pub fail_fast: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Link every configured entry and restow configured packages
    Install(InstallOpts),
    /// Restow packages with GNU stow
    Stow(StowOpts),
    /// Link a single file or directory
    Link(LinkOpts),
    /// Print the detected platform
    Detect,
    /// Generate shell completions
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the per-command log file.
    #[must_use]
    pub const fn log_name(&self) -> &'static str {
        match self {
            Self::Install(_) => "install",
            Self::Stow(_) => "stow",
            Self::Link(_) => "link",
            Self::Detect => "detect",
            Self::Completions(_) => "completions",
            Self::Version => "version",
        }
    }
}

/// Options for the `install` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct InstallOpts {
    /// Skip entries by link label or package name
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Run only these entries (link labels or package names)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Replace existing symlinks that point somewhere else
    #[arg(long)]
    pub relink: bool,
}

/// Options for the `stow` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct StowOpts {
    /// Packages to restow (default: the configured packages)
    pub packages: Vec<String>,
}

/// Options for the `link` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct LinkOpts {
    /// File or directory the link points at
    pub source: PathBuf,

    /// Where the link is created (`~` and `$VAR` are expanded)
    pub target: String,

    /// Name shown in the summary (default: the target's file name)
    #[arg(long)]
    pub label: Option<String>,

    /// Replace an existing symlink that points somewhere else
    #[arg(long)]
    pub relink: bool,
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Shell to generate completions for
    pub shell: Shell,
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::platform::WindowsFlavor;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_install_dry_run() {
        let cli = Cli::parse_from(["dotlink", "--dry-run", "install"]);
        assert!(cli.global.dry_run);
    }

    #[test]
    fn parse_install_dry_run_short() {
        let cli = Cli::parse_from(["dotlink", "-d", "install"]);
        assert!(cli.global.dry_run);
    }

    #[test]
    fn parse_install_skip_entries() {
        let cli = Cli::parse_from(["dotlink", "install", "--skip", "nvim,tmux"]);
        assert!(
            matches!(&cli.command, Command::Install(_)),
            "Expected Install command"
        );
        if let Command::Install(opts) = cli.command {
            assert_eq!(opts.skip, vec!["nvim", "tmux"]);
            assert!(!opts.relink);
        }
    }

    #[test]
    fn parse_install_only_and_relink() {
        let cli = Cli::parse_from(["dotlink", "install", "--only", "vim", "--relink"]);
        if let Command::Install(opts) = cli.command {
            assert_eq!(opts.only, vec!["vim"]);
            assert!(opts.relink);
        } else {
            panic!("Expected Install command");
        }
    }

    #[test]
    fn parse_stow_packages() {
        let cli = Cli::parse_from(["dotlink", "stow", "nvim", "tmux"]);
        if let Command::Stow(opts) = cli.command {
            assert_eq!(opts.packages, vec!["nvim", "tmux"]);
        } else {
            panic!("Expected Stow command");
        }
    }

    #[test]
    fn parse_link() {
        let cli = Cli::parse_from(["dotlink", "link", "vimrc", "~/.vimrc", "--label", "vim"]);
        if let Command::Link(opts) = cli.command {
            assert_eq!(opts.source, PathBuf::from("vimrc"));
            assert_eq!(opts.target, "~/.vimrc");
            assert_eq!(opts.label.as_deref(), Some("vim"));
        } else {
            panic!("Expected Link command");
        }
    }

    #[test]
    fn parse_platform_override() {
        let cli = Cli::parse_from(["dotlink", "--platform", "wsl", "detect"]);
        assert_eq!(
            cli.global.platform,
            Some(Platform::Windows(WindowsFlavor::Wsl))
        );
        assert!(matches!(cli.command, Command::Detect));
    }

    #[test]
    fn reject_unknown_platform() {
        assert!(Cli::try_parse_from(["dotlink", "--platform", "beos", "detect"]).is_err());
    }

    #[test]
    fn parse_fail_fast_after_subcommand() {
        let cli = Cli::parse_from(["dotlink", "install", "--fail-fast"]);
        assert!(cli.global.fail_fast);
    }

    #[test]
    fn parse_version() {
        let cli = Cli::parse_from(["dotlink", "version"]);
        assert!(matches!(cli.command, Command::Version));
        assert_eq!(cli.command.log_name(), "version");
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["dotlink", "-v", "install"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_completions() {
        let cli = Cli::parse_from(["dotlink", "completions", "zsh"]);
        assert!(matches!(
            cli.command,
            Command::Completions(CompletionsOpts { shell: Shell::Zsh })
        ));
    }

    #[test]
    fn parse_root_override() {
        let cli = Cli::parse_from(["dotlink", "--root", "/tmp/dotfiles", "install"]);
        assert_eq!(cli.global.root, Some(PathBuf::from("/tmp/dotfiles")));
    }
}
