//! Command: link every configured entry, then restow configured packages.
use std::sync::Arc;

use anyhow::Result;

use super::{Host, build_context, load_config, run_tasks_to_completion};
use crate::cli::{GlobalOpts, InstallOpts};
use crate::logging::Logger;
use crate::resources::StowLinker;
use crate::tasks::links::InstallLinks;
use crate::tasks::stow::StowPackages;
use crate::tasks::{Selection, Task};

/// Run the install command.
///
/// # Errors
///
/// Returns an error if configuration loading fails or any entry fails.
pub fn run(global: &GlobalOpts, opts: &InstallOpts, log: &Arc<Logger>) -> Result<()> {
    log.info(&format!("dotlink {}", super::version::version()));

    let host = Host::detect(global);
    let config = load_config(global, &host, log)?;
    let ctx = build_context(global, &host, config, log, opts.relink)?.with_selection(Selection {
        only: opts.only.clone(),
        skip: opts.skip.clone(),
    });

    let linker = StowLinker::new(ctx.stow_dir(), ctx.home.clone(), Arc::clone(&ctx.executor));
    let stow = StowPackages::new(Arc::new(linker));
    let tasks: [&dyn Task; 2] = [&InstallLinks, &stow];

    run_tasks_to_completion(&tasks, &ctx, log)
}
