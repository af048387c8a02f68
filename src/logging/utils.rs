//! Log file location, ANSI stripping and timestamps.
use std::fs;
use std::path::PathBuf;

/// Remove terminal escape sequences so log files stay plain text.
///
/// CSI sequences (`ESC [` ... final byte in `@`..`~`) are dropped whole;
/// any other escape drops the single character after `ESC`.
pub(super) fn strip_ansi(s: &str) -> String {
    fn after_first(s: &str) -> &str {
        let mut chars = s.chars();
        chars.next();
        chars.as_str()
    }

    let mut parts = s.split('\x1b');
    let mut out = parts.next().unwrap_or_default().to_string();
    for part in parts {
        let rest = part.strip_prefix('[').map_or_else(
            || after_first(part),
            |csi| after_first(csi.trim_start_matches(|c: char| !('@'..='~').contains(&c))),
        );
        out.push_str(rest);
    }
    out
}

/// `<cache>/dotlink/<command>.log`, creating the directory on the way.
///
/// The cache is `$XDG_CACHE_HOME`, else `~/.cache`. Returns `None` when
/// neither is known or the directory cannot be created, in which case no
/// log file is written.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let var = |key: &str| {
        std::env::var_os(key)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    };
    let cache = var("XDG_CACHE_HOME").or_else(|| {
        var("HOME")
            .or_else(|| var("USERPROFILE"))
            .map(|home| home.join(".cache"))
    })?;

    let dir = cache.join("dotlink");
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Current UTC time, `YYYY-MM-DD HH:MM:SS` with `date`, else `HH:MM:SS`.
pub(super) fn timestamp(date: bool) -> String {
    let format = if date { "%Y-%m-%d %H:%M:%S" } else { "%H:%M:%S" };
    chrono::Utc::now().format(format).to_string()
}
