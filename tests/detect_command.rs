#![cfg(unix)]
#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Integration tests for the `detect`, `version` and `completions` commands.

use std::process::{Command, Output};

fn run(env: &[(&str, &str)], args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dotlink"))
        .env_clear()
        .envs(env.iter().copied())
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn wsl_marker_wins_over_ostype() {
    let output = run(
        &[("WSL_DISTRO_NAME", "Ubuntu"), ("OSTYPE", "linux-gnu")],
        &["detect"],
    );
    assert!(output.status.success());
    assert_eq!(stdout(&output), "wsl");
}

#[test]
fn ostype_darwin_is_macos() {
    let output = run(&[("OSTYPE", "darwin23")], &["detect"]);
    assert_eq!(stdout(&output), "macos");
}

#[test]
fn platform_override_is_reported_with_sections() {
    let output = run(&[], &["--platform", "linux", "-v", "detect"]);
    insta::assert_snapshot!(stdout(&output), @r"
    linux
    sections: common, linux
    ");
}

#[test]
fn version_starts_with_name() {
    let output = run(&[], &["version"]);
    assert!(stdout(&output).starts_with("dotlink "));
}

#[test]
fn completions_mention_subcommands() {
    let output = run(&[], &["completions", "bash"]);
    assert!(output.status.success());
    let script = stdout(&output);
    assert!(script.contains("install"));
    assert!(script.contains("stow"));
}
