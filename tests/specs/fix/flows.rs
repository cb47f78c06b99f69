//! `le fix` specs

use crate::prelude::*;

const CLEAN: &str = r#"{"messages":[],"output":null,"fixable":[]}"#;
const FIXED: &str = r#"{"messages":[],"output":"var a = 1;\n","fixable":["semi"]}"#;

#[test]
fn fix_writes_the_fixed_file() {
    let project = Project::with_engine(&fake_engine_script(CLEAN, FIXED, 0));
    project.file("a.js", "var a = 1\n");

    project
        .le()
        .args(&["fix", "a.js"])
        .passes()
        .stdout_eq("Linter-ESLint: Fix complete.\n");
    assert_eq!(project.read("a.js"), "var a = 1;\n");
}

#[test]
fn fix_on_save_is_quiet_and_opt_in() {
    let project = Project::with_engine(&fake_engine_script(CLEAN, FIXED, 0));
    project.file("a.js", "var a = 1\n");

    project.le().args(&["fix", "a.js", "--on-save"]).passes().stdout_eq("");
    assert_eq!(project.read("a.js"), "var a = 1\n");

    project.settings("fix_on_save = true\n[engine]\nnode_executable = \"sh\"\n");
    project.le().args(&["fix", "a.js", "--on-save"]).passes().stdout_eq("");
    assert_eq!(project.read("a.js"), "var a = 1;\n");
}

#[test]
fn fix_refuses_unsaved_buffers() {
    let project = Project::empty();
    project.file("a.js", "var a = 1\n");

    project
        .le()
        .args(&["fix", "a.js", "--modified"])
        .fails()
        .stderr_has("Linter-ESLint: Please save before fixing");
    assert!(project.worker_log().is_none());
}

#[test]
fn fixing_an_empty_file_does_nothing() {
    let project = Project::empty();
    project.file("empty.js", "");

    project.le().args(&["fix", "empty.js"]).passes().stdout_eq("");
    assert!(project.worker_log().is_none());
}

#[test]
fn fix_without_config_is_a_no_op() {
    let project = Project::empty();
    project.file("a.js", "var a = 1\n");

    let run = project.le().args(&["-o", "json", "fix", "a.js"]).passes();
    assert_eq!(run.stdout_json()["status"], "disabled");
    assert!(project.worker_log().is_none());
}
