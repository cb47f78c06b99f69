//! Worker process startup

use crate::prelude::*;
use std::io::Read;

#[test]
fn worker_announces_ready_and_installs_reporter() {
    let state = tempfile::tempdir().unwrap();
    let mut child = std::process::Command::new(worker_binary())
        .env("LE_STATE_DIR", state.path())
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::piped())
        .spawn()
        .unwrap();

    let mut stdout = child.stdout.take().unwrap();
    let mut len = [0u8; 4];
    stdout.read_exact(&mut len).unwrap();
    let mut frame = vec![0u8; u32::from_be_bytes(len) as usize];
    stdout.read_exact(&mut frame).unwrap();
    let ready: serde_json::Value = serde_json::from_slice(&frame).unwrap();
    assert_eq!(ready["type"], "ready");

    // Closing stdin ends the worker
    drop(child.stdin.take());
    let status = child.wait().unwrap();
    assert!(status.success());

    let reporter = std::fs::read_to_string(state.path().join("reporter.js")).unwrap();
    assert!(reporter.contains("fixable"));
    let log = std::fs::read_to_string(state.path().join("worker.log")).unwrap();
    assert!(log.starts_with("--- le-worker: starting (pid: "));
}
