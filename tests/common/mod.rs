// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed dotfiles repository plus home
// directory, a fluent builder, and in-memory stand-ins for the logger and
// executor so each integration test runs in isolation.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::{Arc, Mutex};

use dotlink::config::Config;
use dotlink::exec::{ExecResult, Executor};
use dotlink::logging::{Log, TaskEntry, TaskStatus};
use dotlink::paths::PathVars;
use dotlink::platform::Platform;
use dotlink::tasks::{Context, RunOptions};

/// An isolated repository (`repo/`) and home directory (`home/`) backed by
/// a [`tempfile::TempDir`].
pub struct TestRepo {
    _dir: tempfile::TempDir,
    base: PathBuf,
}

impl TestRepo {
    /// Create an empty repository with `conf/`, `symlinks/` and `stow/`.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let base = std::fs::canonicalize(dir.path()).expect("canonicalize temp dir");
        for sub in ["repo/conf", "repo/symlinks", "repo/stow", "home", "cache"] {
            std::fs::create_dir_all(base.join(sub)).expect("create fixture dir");
        }
        Self { _dir: dir, base }
    }

    /// Repository root.
    pub fn root(&self) -> PathBuf {
        self.base.join("repo")
    }

    /// Home directory.
    pub fn home(&self) -> PathBuf {
        self.base.join("home")
    }

    /// Path inside the home directory.
    pub fn home_path(&self, rel: &str) -> PathBuf {
        self.home().join(rel)
    }

    /// Path inside `symlinks/`.
    pub fn source_path(&self, rel: &str) -> PathBuf {
        self.root().join("symlinks").join(rel)
    }

    /// Write `conf/<filename>`.
    pub fn with_config_file(self, filename: &str, content: &str) -> Self {
        write(&self.root().join("conf").join(filename), content);
        self
    }

    /// Create a file inside `symlinks/`.
    pub fn with_source(self, rel: &str, content: &str) -> Self {
        write(&self.source_path(rel), content);
        self
    }

    /// Create a file inside the home directory.
    pub fn with_home_file(self, rel: &str, content: &str) -> Self {
        write(&self.home_path(rel), content);
        self
    }

    /// Create a package directory under `stow/`.
    pub fn with_package(self, name: &str) -> Self {
        std::fs::create_dir_all(self.root().join("stow").join(name)).expect("create package");
        self
    }

    /// Load configuration for `platform`.
    pub fn load_config(&self, platform: Platform) -> Config {
        Config::load(&self.root(), platform).expect("load config")
    }

    /// Build a Linux task context with a recording logger.
    pub fn context(
        &self,
        executor: Arc<dyn Executor>,
        opts: RunOptions,
    ) -> (Context, Arc<RecordingLog>) {
        let log = Arc::new(RecordingLog::default());
        let home = self.home().to_string_lossy().into_owned();
        let ctx = Context::new(
            self.load_config(Platform::Linux),
            Platform::Linux,
            Arc::clone(&log) as Arc<dyn Log>,
            PathVars::from_pairs([("HOME", home.as_str())]),
            executor,
        )
        .expect("build context")
        .with_options(opts);
        (ctx, log)
    }

    /// Run the `dotlink` binary against this repository with a scrubbed
    /// environment (`HOME`, `XDG_CACHE_HOME` and `--root` point into the
    /// fixture, `PATH` is empty).
    pub fn run_cli(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_dotlink"))
            .env_clear()
            .env("HOME", self.home())
            .env("XDG_CACHE_HOME", self.base.join("cache"))
            .arg("--root")
            .arg(self.root())
            .args(args)
            .output()
            .expect("run dotlink")
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent");
    }
    std::fs::write(path, content).expect("write fixture file");
}

/// Standard output of a finished command, ANSI codes included.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// [`Log`] that only records, so tests can inspect every call.
#[derive(Debug, Default)]
pub struct RecordingLog {
    messages: Mutex<Vec<String>>,
    entries: Mutex<Vec<TaskEntry>>,
}

impl RecordingLog {
    fn push(&self, level: &str, msg: &str) {
        self.messages
            .lock()
            .expect("lock")
            .push(format!("{level}: {msg}"));
    }

    /// Names of recorded entries with `status`.
    pub fn names(&self, status: TaskStatus) -> Vec<String> {
        self.entries
            .lock()
            .expect("lock")
            .iter()
            .filter(|e| e.status == status)
            .map(|e| e.name.clone())
            .collect()
    }

    /// Whether any message at `level` contains `needle`.
    pub fn logged(&self, level: &str, needle: &str) -> bool {
        self.messages
            .lock()
            .expect("lock")
            .iter()
            .any(|m| m.starts_with(level) && m.contains(needle))
    }
}

impl Log for RecordingLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
    fn dry_run(&self, msg: &str) {
        self.push("dry_run", msg);
    }
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        self.entries.lock().expect("lock").push(TaskEntry {
            name: name.to_string(),
            status,
            message: message.map(String::from),
        });
    }
}

/// [`Executor`] that records every invocation and answers from a script.
#[derive(Debug, Default)]
pub struct FakeExecutor {
    /// Programs reported as present on `PATH`.
    pub available: Vec<String>,
    /// Packages whose restow should fail.
    pub failing: Vec<String>,
    /// Every `(program, args)` pair that was run.
    pub calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl FakeExecutor {
    /// Executor on whose `PATH` exactly `programs` exist.
    pub fn with_programs(programs: &[&str]) -> Self {
        Self {
            available: programs.iter().map(|p| (*p).to_string()).collect(),
            ..Self::default()
        }
    }

    /// Recorded invocations.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().expect("lock").clone()
    }
}

impl Executor for FakeExecutor {
    fn run(&self, program: &str, args: &[String]) -> anyhow::Result<ExecResult> {
        let result = self.run_unchecked(program, args)?;
        if !result.success {
            anyhow::bail!("{program} failed");
        }
        Ok(result)
    }

    fn run_unchecked(&self, program: &str, args: &[String]) -> anyhow::Result<ExecResult> {
        self.calls
            .lock()
            .expect("lock")
            .push((program.to_string(), args.to_vec()));
        let failed = args.last().is_some_and(|pkg| self.failing.contains(pkg));
        Ok(ExecResult {
            stdout: String::new(),
            stderr: if failed { "conflict".to_string() } else { String::new() },
            success: !failed,
            code: Some(i32::from(failed)),
        })
    }

    fn which(&self, program: &str) -> bool {
        self.available.iter().any(|p| p == program)
    }
}
