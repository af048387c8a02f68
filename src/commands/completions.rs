//! Command: generate shell completion scripts.
use std::io::Write;

use clap::CommandFactory as _;
use clap_complete::Shell;

use crate::cli::Cli;

/// Write the completion script for `shell` to `out`.
pub fn generate(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, out);
}

/// Print the completion script for `shell` to stdout.
pub fn run(shell: Shell) {
    generate(shell, &mut std::io::stdout());
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bash_completion_mentions_subcommands() {
        let mut buf = Vec::new();
        generate(Shell::Bash, &mut buf);
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("dotlink"));
        assert!(script.contains("install"));
        assert!(script.contains("stow"));
    }
}
