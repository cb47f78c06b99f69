// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::TempDir;

fn sh(script: &str, cwd: &std::path::Path) -> EngineCommand {
    EngineCommand {
        program: "sh".to_string(),
        args: vec!["-c".to_string(), script.to_string()],
        cwd: cwd.to_path_buf(),
        env: vec![("LE_PROBE".to_string(), "probe-value".to_string())],
    }
}

#[tokio::test]
async fn captures_stdout_stderr_and_status() {
    let tmp = TempDir::new().unwrap();
    let process = SystemEngineProcess::new(Some(Duration::from_secs(5)));
    let output = process
        .execute(&sh("cat; echo oops >&2; exit 1", tmp.path()), "var x;")
        .await
        .unwrap();
    assert_eq!(output.status, Some(1));
    assert_eq!(output.stdout, "var x;");
    assert_eq!(output.stderr.trim(), "oops");
}

#[tokio::test]
async fn applies_cwd_and_env() {
    let tmp = TempDir::new().unwrap();
    let process = SystemEngineProcess::new(Some(Duration::from_secs(5)));
    let output = process
        .execute(&sh("pwd; echo $LE_PROBE", tmp.path()), "")
        .await
        .unwrap();
    let lines: Vec<&str> = output.stdout.lines().collect();
    let expected = tmp.path().canonicalize().unwrap();
    assert_eq!(std::path::Path::new(lines[0]).canonicalize().unwrap(), expected);
    assert_eq!(lines[1], "probe-value");
}

#[tokio::test]
async fn missing_program_is_spawn_error() {
    let tmp = TempDir::new().unwrap();
    let process = SystemEngineProcess::new(Some(Duration::from_secs(5)));
    let command = EngineCommand {
        program: "/nonexistent/node".to_string(),
        args: vec![],
        cwd: tmp.path().to_path_buf(),
        env: vec![],
    };
    let err = process.execute(&command, "").await.unwrap_err();
    assert!(matches!(err, EngineProcessError::Spawn { ref program, .. } if program == "/nonexistent/node"));
}

#[tokio::test]
async fn slow_engine_times_out() {
    let tmp = TempDir::new().unwrap();
    let process = SystemEngineProcess::new(Some(Duration::from_millis(100)));
    let err = process
        .execute(&sh("sleep 10", tmp.path()), "")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineProcessError::Timeout(_)));
}

#[tokio::test]
async fn slow_engine_runs_to_completion_without_a_timeout() {
    let tmp = TempDir::new().unwrap();
    let process = SystemEngineProcess::new(None);
    let output = process
        .execute(&sh("sleep 0.2; echo finished", tmp.path()), "")
        .await
        .unwrap();
    assert_eq!(output.status, Some(0));
    assert_eq!(output.stdout.trim(), "finished");
}
