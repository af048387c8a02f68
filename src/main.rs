//! `dotlink` command-line entry point.
use std::sync::Arc;

use anyhow::Result;
use clap::Parser as _;

use dotlink::cli::{Cli, Command};
use dotlink::commands;
use dotlink::logging::{Logger, init_subscriber};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    init_subscriber(args.verbose, args.command.log_name());
    let log = Arc::new(Logger::new(args.command.log_name()));

    match &args.command {
        Command::Install(opts) => commands::install::run(&args.global, opts, &log),
        Command::Stow(opts) => commands::stow::run(&args.global, opts, &log),
        Command::Link(opts) => commands::link::run(&args.global, opts, &log),
        Command::Detect => {
            commands::detect::run(&args.global, args.verbose);
            Ok(())
        }
        Command::Completions(opts) => {
            commands::completions::run(opts.shell);
            Ok(())
        }
        Command::Version => {
            commands::version::run();
            Ok(())
        }
    }
}
