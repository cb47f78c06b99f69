//! `le debug` specs

use crate::prelude::*;

#[test]
fn debug_reports_local_engine_and_config() {
    let project = Project::with_engine("exit 0\n");
    project.file("src/a.js", "var a = 1;\n");

    project
        .le()
        .args(&["debug", "src/a.js"])
        .passes()
        .stdout_has("engine:         ")
        .stdout_has("node_modules/eslint (local, 8.57.0)")
        .stdout_has(".eslintrc.json")
        .stdout_has("lint disabled:  false")
        .stdout_has("node_executable = \"sh\"");
}

#[test]
fn debug_without_project_config() {
    let project = Project::empty();
    project.file("a.js", "x\n");

    let run = project.le().args(&["-o", "json", "debug", "a.js"]).passes();
    let report = run.stdout_json();
    assert_eq!(report["configPath"], serde_json::Value::Null);
    assert_eq!(report["lintDisabled"], true);
    assert!(report["engineError"].is_string() || report["enginePath"].is_string());
}

#[test]
fn debug_never_starts_a_worker() {
    let project = Project::empty();
    project.file("a.js", "x\n");
    project.le().args(&["debug", "a.js"]).passes();
    assert!(project.worker_log().is_none());
}
