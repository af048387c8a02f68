//! Command: restow packages with the external package linker.
use std::sync::Arc;

use anyhow::Result;

use super::{Host, build_context, load_config, run_tasks_to_completion};
use crate::cli::{GlobalOpts, StowOpts};
use crate::logging::Logger;
use crate::resources::StowLinker;
use crate::tasks::Task;
use crate::tasks::stow::StowPackages;

/// Run the stow command.
///
/// Packages named on the command line replace the configured list.
///
/// # Errors
///
/// Returns an error if configuration loading fails or any package fails.
pub fn run(global: &GlobalOpts, opts: &StowOpts, log: &Arc<Logger>) -> Result<()> {
    let host = Host::detect(global);
    let config = load_config(global, &host, log)?;
    let ctx = build_context(global, &host, config, log, false)?;

    let linker = StowLinker::new(ctx.stow_dir(), ctx.home.clone(), Arc::clone(&ctx.executor));
    let mut stow = StowPackages::new(Arc::new(linker));
    if !opts.packages.is_empty() {
        stow = stow.with_packages(opts.packages.clone());
    }
    let tasks: [&dyn Task; 1] = [&stow];

    run_tasks_to_completion(&tasks, &ctx, log)
}
