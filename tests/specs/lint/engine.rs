//! Linting through an installed engine

use crate::prelude::*;

const REPORT: &str = r#"{"messages":[{"ruleId":"semi","severity":2,"message":"Missing semicolon.","line":1,"column":10},{"ruleId":"no-console","severity":1,"message":"Unexpected console statement.","line":2,"column":1}],"output":null,"fixable":["semi"]}"#;
const CLEAN: &str = r#"{"messages":[],"output":null,"fixable":[]}"#;

#[test]
fn lint_prints_diagnostics_and_fails_on_errors() {
    let project = Project::with_engine(&fake_engine_script(REPORT, CLEAN, 1));
    project.file("src/a.js", "var a = 1\nconsole.log(a);\n");

    let run = project.le().args(&["lint", "src/a.js"]).fails();
    assert_eq!(run.code(), Some(1));
    run.stdout_has("src/a.js\n")
        .stdout_has("1:10  error    Missing semicolon.  semi")
        .stdout_has("2:1  warning  Unexpected console statement.  no-console")
        .stdout_has("✖ 2 problems (1 error, 1 warning)");
}

#[test]
fn rule_ids_can_be_hidden() {
    let project = Project::with_engine(&fake_engine_script(REPORT, CLEAN, 1));
    project.settings("show_rule = false\n[engine]\nnode_executable = \"sh\"\n");
    project.file("a.js", "var a = 1\n");

    let run = project.le().args(&["lint", "a.js"]).fails();
    assert!(run.stdout().contains("Missing semicolon.\n"), "{}", run.stdout());
}

#[test]
fn clean_file_passes() {
    let project = Project::with_engine(&fake_engine_script(CLEAN, CLEAN, 0));
    project.file("a.js", "var a = 1;\n");

    project.le().args(&["lint", "a.js"]).passes().stdout_eq("");
}

#[test]
fn engine_crash_is_an_error() {
    let project = Project::with_engine("echo 'Oops! Something went wrong!' >&2\nexit 2\n");
    project.file("a.js", "var a = 1;\n");

    project
        .le()
        .args(&["lint", "a.js"])
        .fails()
        .stderr_has("Oops! Something went wrong!");
}

#[test]
fn many_files_share_one_worker() {
    let project = Project::with_engine(&fake_engine_script(CLEAN, CLEAN, 0));
    project.file("a.js", "a;\n");
    project.file("b.js", "b;\n");
    project.file("lib/c.js", "c;\n");

    project
        .le()
        .args(&["lint", "a.js", "b.js", "lib/c.js"])
        .passes();

    let log = project.worker_log().unwrap_or_default();
    assert_eq!(log.matches("--- le-worker: starting").count(), 1, "{log}");
}
