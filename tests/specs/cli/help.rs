//! CLI help output specs

use crate::prelude::*;

#[test]
fn le_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn le_help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("lint")
        .stdout_has("fix")
        .stdout_has("debug")
        .stdout_has("serve");
}

#[test]
fn le_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}

#[test]
fn le_lint_without_files_is_a_usage_error() {
    cli().args(&["lint"]).fails().stderr_has("Usage:");
}

#[test]
fn worker_version_and_help() {
    let version = std::process::Command::new(worker_binary())
        .arg("--version")
        .output()
        .unwrap();
    assert!(version.status.success());
    assert!(String::from_utf8_lossy(&version.stdout).starts_with("le-worker 0.1"));

    let help = std::process::Command::new(worker_binary())
        .arg("--help")
        .output()
        .unwrap();
    assert!(String::from_utf8_lossy(&help.stdout).contains("USAGE:"));
}

#[test]
fn worker_rejects_unknown_arguments() {
    let output = std::process::Command::new(worker_binary())
        .arg("--bogus")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unexpected argument"));
}
