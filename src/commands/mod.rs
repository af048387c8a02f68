//! Top-level subcommand orchestration.
pub mod completions;
pub mod detect;
pub mod install;
pub mod link;
pub mod stow;
pub mod version;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::error::ConfigError;
use crate::exec::{Executor, SystemExecutor};
use crate::logging::{Log, Logger};
use crate::paths::PathVars;
use crate::platform::Platform;
use crate::tasks::{self, Context, RunOptions, Task};

/// Environment snapshot and the platform it implies.
#[derive(Debug, Clone)]
pub struct Host {
    /// Process environment, read once at startup.
    pub env: HashMap<String, String>,
    /// Detected platform, or the `--platform` override.
    pub platform: Platform,
}

impl Host {
    /// Snapshot the process environment and detect the platform.
    #[must_use]
    pub fn detect(global: &GlobalOpts) -> Self {
        let env = Platform::process_env();
        let platform = global.platform.unwrap_or_else(|| Platform::detect(&env));
        Self { env, platform }
    }
}

/// Resolve the dotfiles root: explicit path, then `DOTLINK_ROOT`, then `cwd`
/// if it contains `conf/`.
///
/// # Errors
///
/// Returns [`ConfigError::RootMissing`] if an explicitly named root does not
/// exist, or [`ConfigError::RootNotFound`] if nothing qualifies.
pub fn resolve_root(
    explicit: Option<&Path>,
    env: &HashMap<String, String>,
    cwd: &Path,
) -> Result<PathBuf, ConfigError> {
    let named = explicit.map(Path::to_path_buf).or_else(|| {
        env.get("DOTLINK_ROOT")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    });

    if let Some(root) = named {
        let root = if root.is_absolute() {
            root
        } else {
            cwd.join(root)
        };
        return dunce::canonicalize(&root).map_err(|_| ConfigError::RootMissing { path: root });
    }

    if cwd.join("conf").is_dir() {
        return Ok(cwd.to_path_buf());
    }

    Err(ConfigError::RootNotFound)
}

/// Locate the root and load the configuration for `host`, logging what was
/// found and any validation warnings.
///
/// # Errors
///
/// Returns an error if the root cannot be resolved or a config file fails to
/// parse.
pub fn load_config(global: &GlobalOpts, host: &Host, log: &Logger) -> Result<Config> {
    let cwd = std::env::current_dir().context("reading current directory")?;
    let root = resolve_root(global.root.as_deref(), &host.env, &cwd)?;

    log.stage("Loading configuration");
    log.info(&format!("root: {}", root.display()));
    log.info(&format!(
        "platform: {} ({})",
        host.platform,
        host.platform.categories().join(", ")
    ));

    let config = Config::load(&root, host.platform)?;
    log.info(&format!(
        "loaded {} links, {} packages",
        config.links.len(),
        config.packages.len()
    ));

    let warnings = config.validate();
    if !warnings.is_empty() {
        log.warn(&format!(
            "found {} configuration warning(s):",
            warnings.len()
        ));
        for warning in &warnings {
            log.warn(&format!(
                "  {} [{}]: {}",
                warning.source, warning.item, warning.message
            ));
        }
    }

    Ok(config)
}

/// Build the task context for a real run.
///
/// # Errors
///
/// Returns an error if no home directory is known.
pub fn build_context(
    global: &GlobalOpts,
    host: &Host,
    config: Config,
    log: &Arc<Logger>,
    relink: bool,
) -> Result<Context> {
    let executor: Arc<dyn Executor> = Arc::new(SystemExecutor);
    let vars = PathVars::for_platform(&host.env, host.platform, executor.as_ref());
    let ctx = Context::new(
        config,
        host.platform,
        Arc::clone(log) as Arc<dyn Log>,
        vars,
        executor,
    )?
    .with_options(RunOptions {
        dry_run: global.dry_run,
        fail_fast: global.fail_fast,
        relink,
    });
    Ok(ctx)
}

/// Execute every task in order, print the summary, and bail if anything
/// failed.
///
/// With fail-fast enabled, stops after the first task that recorded a
/// failure.
///
/// # Errors
///
/// Returns an error if one or more entries recorded a failure.
pub fn run_tasks_to_completion(tasks: &[&dyn Task], ctx: &Context, log: &Logger) -> Result<()> {
    if ctx.opts.dry_run {
        log.info("dry run: no changes will be made");
    }

    for task in tasks {
        tasks::execute(*task, ctx);
        if ctx.opts.fail_fast && log.has_failures() {
            break;
        }
    }

    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} entries failed");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn explicit_root_wins() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        let b_str = b.path().to_string_lossy().into_owned();
        let root = resolve_root(Some(a.path()), &env(&[("DOTLINK_ROOT", b_str.as_str())]), b.path())
        .unwrap();
        assert_eq!(root, dunce::canonicalize(a.path()).unwrap());
    }

    #[test]
    fn env_root_used_without_flag() {
        let a = tempfile::tempdir().unwrap();
        let cwd = tempfile::tempdir().unwrap();
        let a_str = a.path().to_string_lossy().into_owned();
        let root = resolve_root(None, &env(&[("DOTLINK_ROOT", a_str.as_str())]), cwd.path())
        .unwrap();
        assert_eq!(root, dunce::canonicalize(a.path()).unwrap());
    }

    #[test]
    fn relative_root_is_taken_from_cwd() {
        let cwd = tempfile::tempdir().unwrap();
        std::fs::create_dir(cwd.path().join("dots")).unwrap();
        let root = resolve_root(Some(Path::new("dots")), &env(&[]), cwd.path()).unwrap();
        assert_eq!(root, dunce::canonicalize(cwd.path().join("dots")).unwrap());
    }

    #[test]
    fn missing_explicit_root_is_an_error() {
        let cwd = tempfile::tempdir().unwrap();
        let err = resolve_root(Some(&cwd.path().join("nope")), &env(&[]), cwd.path()).unwrap_err();
        assert!(matches!(err, ConfigError::RootMissing { .. }));
    }

    #[test]
    fn cwd_with_conf_is_root() {
        let cwd = tempfile::tempdir().unwrap();
        std::fs::create_dir(cwd.path().join("conf")).unwrap();
        assert_eq!(
            resolve_root(None, &env(&[]), cwd.path()).unwrap(),
            cwd.path()
        );
    }

    #[test]
    fn nothing_found_is_an_error() {
        let cwd = tempfile::tempdir().unwrap();
        let err = resolve_root(None, &env(&[]), cwd.path()).unwrap_err();
        assert!(matches!(err, ConfigError::RootNotFound));
        assert!(err.to_string().contains("DOTLINK_ROOT"));
    }
}
