//! Files without a project config are skipped

use crate::prelude::*;

#[test]
fn lint_without_config_prints_nothing() {
    let project = Project::empty();
    project.file("a.js", "var a = 1\n");

    project.le().args(&["lint", "a.js"]).passes().stdout_eq("");
}

#[test]
fn lint_without_config_as_json() {
    let project = Project::empty();
    project.file("a.js", "var a = 1\n");

    let run = project.le().args(&["-o", "json", "lint", "a.js"]).passes();
    let records = run.stdout_json();
    assert_eq!(records[0]["messages"], serde_json::json!([]));
    assert!(records[0]["filePath"].as_str().unwrap().ends_with("a.js"));
}

#[test]
fn lint_from_stdin_without_config() {
    let project = Project::empty();

    project
        .le()
        .args(&["lint", "--stdin", "--stdin-filename", "src/b.js"])
        .stdin("var b = 2\n")
        .passes()
        .stdout_eq("");
}

#[test]
fn remote_files_get_a_warning() {
    let project = Project::empty();

    project
        .le()
        .args(&["lint", "sftp://host/a.js"])
        .passes()
        .stderr_has("Remote file open, linter-eslint is disabled for this file.");
    assert!(project.worker_log().is_none());
}

#[test]
fn missing_engine_is_reported_when_skipping_is_off() {
    let project = Project::empty();
    project.file("a.js", "var a = 1\n");
    project.settings("[engine]\ndisable_when_no_eslint_config = false\n");

    project
        .le()
        .args(&["lint", "a.js"])
        .fails()
        .stderr_has("failed to lint")
        .stderr_has("Cannot find module `eslint`");
}
