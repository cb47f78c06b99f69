//! `le serve` specs

use crate::prelude::*;

const REPORT: &str = r#"{"messages":[{"ruleId":"semi","severity":2,"message":"Missing semicolon.","line":1,"column":10}],"output":null,"fixable":["semi"]}"#;

#[test]
fn answers_each_request_by_id() {
    let project = Project::with_engine(&fake_engine_script(REPORT, REPORT, 1));
    let input = [
        r#"{"id":1,"command":"lint","filePath":"a.js","contents":"var a = 1\n"}"#,
        r#"{"id":2,"command":"fix","filePath":"b.js","contents":"x","modified":true}"#,
        r#"{"id":3,"command":"reload"}"#,
        "garbage",
    ]
    .join("\n");

    let run = project.le().args(&["serve"]).stdin(&input).passes();
    let replies = run.stdout_lines_json();
    assert_eq!(replies.len(), 4, "{}", run.stdout());

    let reply = |id: serde_json::Value| {
        replies
            .iter()
            .find(|r| r["id"] == id)
            .unwrap_or_else(|| panic!("no reply for {id}"))
            .clone()
    };
    let lint = reply(1.into());
    assert_eq!(lint["ok"], true);
    assert_eq!(lint["messages"][0]["ruleId"], "semi");

    let fix = reply(2.into());
    assert_eq!(fix["ok"], false);
    assert_eq!(fix["error"], "Linter-ESLint: Please save before fixing");

    assert_eq!(reply(3.into())["changed"], false);
    assert_eq!(reply(serde_json::Value::Null)["ok"], false);
}

#[test]
fn serve_starts_the_worker_up_front() {
    let project = Project::empty();
    project.le().args(&["serve"]).stdin("").passes().stdout_eq("");
    let log = project.worker_log().unwrap_or_default();
    assert!(log.contains("--- le-worker: starting (pid: "), "{log}");
}
