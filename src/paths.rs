//! Expansion of configured target templates into absolute paths.
//!
//! Templates may use `~`, `$VAR` and `${VAR}`.  Variables resolve against an
//! explicit [`PathVars`] map built once per run, never against ambient
//! process state, so expansion is deterministic under test.
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::exec::Executor;
use crate::platform::Platform;

/// Variables available to target templates.
#[derive(Debug, Clone, Default)]
pub struct PathVars {
    vars: HashMap<String, String>,
}

impl PathVars {
    /// Build the variable map for `platform` from an environment snapshot.
    ///
    /// `HOME` falls back to `USERPROFILE` on native Windows.  XDG base
    /// directories get their specification defaults when unset.  On WSL,
    /// `WINHOME` is derived from the logged-in Windows user, queried through
    /// `executor`; it stays undefined if the query fails.
    #[must_use]
    pub fn for_platform(
        env: &HashMap<String, String>,
        platform: Platform,
        executor: &dyn Executor,
    ) -> Self {
        let mut vars = env.clone();

        if platform.is_windows()
            && !platform.is_wsl()
            && !vars.contains_key("HOME")
            && let Some(profile) = env.get("USERPROFILE")
        {
            vars.insert("HOME".to_string(), profile.clone());
        }

        if let Some(home) = vars.get("HOME").cloned() {
            let home = Path::new(&home);
            vars.entry("XDG_CONFIG_HOME".to_string())
                .or_insert_with(|| home.join(".config").to_string_lossy().into_owned());
            vars.entry("XDG_DATA_HOME".to_string())
                .or_insert_with(|| home.join(".local/share").to_string_lossy().into_owned());
        }

        if platform.is_wsl()
            && !vars.contains_key("WINHOME")
            && let Some(user) = windows_username(executor)
        {
            vars.insert("WINHOME".to_string(), format!("/mnt/c/Users/{user}"));
        }

        Self { vars }
    }

    /// Build a map directly from pairs.
    #[must_use]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Look up a variable.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// The home directory, if known.
    #[must_use]
    pub fn home(&self) -> Option<PathBuf> {
        self.get("HOME").map(PathBuf::from)
    }

    /// Expand `template` into a path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownVariable`] if the template references a
    /// variable that is not defined (including `~` without `HOME`).
    pub fn expand(&self, template: &str) -> Result<PathBuf, ConfigError> {
        let expanded = shellexpand::full_with_context(
            template,
            || self.get("HOME"),
            |name: &str| -> Result<Option<&str>, String> {
                self.get(name)
                    .map(Some)
                    .ok_or_else(|| format!("{name} is not set"))
            },
        )
        .map_err(|e| ConfigError::UnknownVariable {
            var: e.var_name,
            template: template.to_string(),
        })?;

        if template.starts_with('~') && self.get("HOME").is_none() {
            return Err(ConfigError::UnknownVariable {
                var: "HOME".to_string(),
                template: template.to_string(),
            });
        }

        Ok(PathBuf::from(expanded.as_ref()))
    }
}

/// Query the logged-in Windows user from inside WSL.
fn windows_username(executor: &dyn Executor) -> Option<String> {
    let args = ["/c".to_string(), "echo %USERNAME%".to_string()];
    let result = executor.run("cmd.exe", &args).ok()?;
    let user = result.stdout.trim().trim_end_matches('\r').to_string();
    (!user.is_empty() && user != "%USERNAME%").then_some(user)
}
