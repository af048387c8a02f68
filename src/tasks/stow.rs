//! Restow configured packages through a [`PackageLinker`].
use anyhow::Result;
use std::sync::Arc;

use super::{Context, Task, TaskResult, TaskStats};
use crate::logging::TaskStatus;
use crate::resources::PackageLinker;

/// Hand each configured package to the package linker.
#[derive(Debug)]
pub struct StowPackages {
    linker: Arc<dyn PackageLinker>,
    packages: Option<Vec<String>>,
}

impl StowPackages {
    /// Restow the packages configured for the platform.
    #[must_use]
    pub fn new(linker: Arc<dyn PackageLinker>) -> Self {
        Self {
            linker,
            packages: None,
        }
    }

    /// Restow exactly `packages`, ignoring the configured list.
    #[must_use]
    pub fn with_packages(mut self, packages: Vec<String>) -> Self {
        self.packages = Some(packages);
        self
    }

    fn packages(&self, ctx: &Context) -> Vec<String> {
        self.packages.as_ref().map_or_else(
            || {
                ctx.config
                    .packages
                    .iter()
                    .filter(|p| ctx.selection.allows(p))
                    .cloned()
                    .collect()
            },
            Clone::clone,
        )
    }
}

impl Task for StowPackages {
    fn name(&self) -> &'static str {
        "Stow packages"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !self.packages(ctx).is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let tool = self.linker.name();
        if !self.linker.is_available() {
            ctx.log
                .warn(&format!("{tool} not found on PATH, skipping packages"));
            return Ok(TaskResult::Skipped(format!("{tool} not found")));
        }

        let mut stats = TaskStats::new();
        for package in self.packages(ctx) {
            if ctx.opts.dry_run {
                ctx.log.dry_run(&format!("would run {tool} for {package}"));
                ctx.log
                    .record_task(&package, TaskStatus::DryRun, Some("would restow"));
                stats.changed += 1;
                continue;
            }

            match self.linker.relink(&package) {
                Ok(()) => {
                    ctx.log.debug(&format!("restowed {package}"));
                    ctx.log
                        .record_task(&package, TaskStatus::Ok, Some("restowed"));
                    stats.changed += 1;
                }
                Err(e) if e.is_recoverable() => {
                    ctx.log.warn(&format!("{package}: {e}"));
                    ctx.log
                        .record_task(&package, TaskStatus::Skipped, Some(&e.to_string()));
                    stats.skipped += 1;
                }
                Err(e) if ctx.opts.fail_fast => {
                    return Err(anyhow::Error::from(e).context(format!("restow {package}")));
                }
                Err(e) => {
                    ctx.log.error(&format!("{package}: {e}"));
                    ctx.log
                        .record_task(&package, TaskStatus::Failed, Some(&e.to_string()));
                    stats.failed += 1;
                }
            }
        }

        Ok(stats.finish(ctx))
    }
}
