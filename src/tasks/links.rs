//! Install the configured links with the symlink installer.
use anyhow::{Context as _, Result};
use std::path::Path;

use super::{Context, Task, TaskResult, TaskStats};
use crate::config::links::LinkEntry;
use crate::error::{ConfigError, DotlinkError};
use crate::logging::TaskStatus;
use crate::paths::PathVars;
use crate::resources::fs::{backup_path, paths_equal};
use crate::resources::{LinkOutcome, LinkPlan, LinkRequest, symlink};

/// Link every configured entry from `symlinks/` to its target.
#[derive(Debug)]
pub struct InstallLinks;

impl Task for InstallLinks {
    fn name(&self) -> &'static str {
        "Install links"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.links.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let mut stats = TaskStats::new();
        let symlinks_dir = ctx.symlinks_dir();

        for entry in &ctx.config.links {
            if !ctx.selection.allows(&entry.label) {
                ctx.log.debug(&format!("not selected: {}", entry.label));
                stats.skipped += 1;
                continue;
            }

            let result = request_for(entry, &symlinks_dir, &ctx.vars)
                .map_err(|e| anyhow::Error::from(DotlinkError::from(e)))
                .and_then(|request| apply(ctx, &request));

            match result {
                Ok(TaskStatus::Unchanged) => stats.already_ok += 1,
                Ok(_) => stats.changed += 1,
                Err(e) if ctx.opts.fail_fast => {
                    return Err(e.context(format!("link {}", entry.label)));
                }
                Err(e) => {
                    ctx.log.error(&format!("{}: {e:#}", entry.label));
                    ctx.log
                        .record_task(&entry.label, TaskStatus::Failed, Some(&format!("{e:#}")));
                    stats.failed += 1;
                }
            }
        }

        Ok(stats.finish(ctx))
    }
}

/// Resolve a configured entry into an installer request.
///
/// Relative sources are taken from `symlinks_dir`; the target template is
/// expanded with `vars`.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownVariable`] if the target template uses an
/// undefined variable.
pub fn request_for(
    entry: &LinkEntry,
    symlinks_dir: &Path,
    vars: &PathVars,
) -> Result<LinkRequest, ConfigError> {
    let source = Path::new(&entry.source);
    let source = if source.is_absolute() {
        source.to_path_buf()
    } else {
        symlinks_dir.join(source)
    };
    let target = vars.expand(&entry.target)?;
    Ok(LinkRequest::new(source, target, entry.label.clone()))
}

/// Install one request (or report it under dry-run) and record the result.
///
/// Returns the status that was recorded.
///
/// # Errors
///
/// Returns an error if the target cannot be inspected or the installer
/// fails. Nothing is recorded in that case.
pub fn apply(ctx: &Context, request: &LinkRequest) -> Result<TaskStatus> {
    if ctx.opts.dry_run {
        return report(ctx, request);
    }

    let outcome = symlink::install(request, ctx.install_options()).map_err(DotlinkError::from)?;
    match outcome {
        LinkOutcome::AlreadyLinked => {
            if let Ok(points_to) = std::fs::read_link(&request.target) {
                warn_if_elsewhere(ctx, request, &points_to);
            }
            ctx.log
                .debug(&format!("ok: {} (already linked)", request.target.display()));
            ctx.log
                .record_task(&request.label, TaskStatus::Unchanged, None);
            Ok(TaskStatus::Unchanged)
        }
        LinkOutcome::BackedUpAndLinked => {
            ctx.log.info(&format!(
                "backed up {} to {}",
                request.target.display(),
                backup_path(&request.target).display()
            ));
            ctx.log.debug(&format!("linked {}", request.description()));
            ctx.log
                .record_task(&request.label, TaskStatus::Ok, Some(&outcome.to_string()));
            Ok(TaskStatus::Ok)
        }
        LinkOutcome::Linked | LinkOutcome::Relinked => {
            ctx.log
                .debug(&format!("{outcome} {}", request.description()));
            ctx.log
                .record_task(&request.label, TaskStatus::Ok, Some(&outcome.to_string()));
            Ok(TaskStatus::Ok)
        }
    }
}

fn warn_if_elsewhere(ctx: &Context, request: &LinkRequest, points_to: &Path) {
    if !paths_equal(points_to, &request.source) {
        ctx.log.warn(&format!(
            "{} links to {}, not {} (use --relink to replace)",
            request.target.display(),
            points_to.display(),
            request.source.display()
        ));
    }
}

/// Dry-run: record what [`symlink::install`] would do.
fn report(ctx: &Context, request: &LinkRequest) -> Result<TaskStatus> {
    let plan = symlink::plan(request, ctx.install_options())
        .with_context(|| format!("inspect {}", request.target.display()))?;

    let status = match &plan {
        LinkPlan::Keep { points_to } => {
            warn_if_elsewhere(ctx, request, points_to);
            ctx.log
                .debug(&format!("ok: {} (already linked)", request.target.display()));
            ctx.log
                .record_task(&request.label, TaskStatus::Unchanged, None);
            TaskStatus::Unchanged
        }
        LinkPlan::Create => {
            ctx.log
                .dry_run(&format!("would link {}", request.description()));
            ctx.log
                .record_task(&request.label, TaskStatus::DryRun, Some("would link"));
            TaskStatus::DryRun
        }
        LinkPlan::BackupAndCreate => {
            ctx.log.dry_run(&format!(
                "would back up {} to {} and link {}",
                request.target.display(),
                backup_path(&request.target).display(),
                request.description()
            ));
            ctx.log.record_task(
                &request.label,
                TaskStatus::DryRun,
                Some("would back up and link"),
            );
            TaskStatus::DryRun
        }
        LinkPlan::Replace { points_to } => {
            ctx.log.dry_run(&format!(
                "would relink {} (currently -> {})",
                request.description(),
                points_to.display()
            ));
            ctx.log
                .record_task(&request.label, TaskStatus::DryRun, Some("would relink"));
            TaskStatus::DryRun
        }
    };
    Ok(status)
}
