// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::engine::FakeEngineProcess;
use crate::worker::FakeWorkerAdapter;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run a test with captured tracing output
fn with_tracing<F, Fut>(f: F) -> (String, Fut::Output)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future,
{
    let logs = CapturedLogs::default();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(f())
    });

    (logs.contents(), result)
}

fn assert_log(logs: &str, label: &str, expected: &str) {
    assert!(logs.contains(expected), "Should log {label}. Logs:\n{logs}",);
}

fn command() -> EngineCommand {
    EngineCommand {
        program: "node".to_string(),
        args: vec!["--stdin".to_string()],
        cwd: PathBuf::from("/project"),
        env: vec![],
    }
}

#[test]
fn traced_worker_spawn_logs_entry_and_completion() {
    let (logs, result) = with_tracing(|| async {
        let traced = TracedWorkerAdapter::new(FakeWorkerAdapter::new());
        traced.spawn().await.map(|_| ())
    });

    assert!(result.is_ok());
    assert_log(&logs, "span name", "worker.spawn");
    assert_log(&logs, "entry", "starting");
    assert_log(&logs, "completion", "worker spawned");
    assert_log(&logs, "elapsed", "elapsed_ms");
}

#[test]
fn traced_worker_spawn_logs_failure() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakeWorkerAdapter::new();
        fake.fail_spawns(1);
        TracedWorkerAdapter::new(fake).spawn().await.map(|_| ())
    });

    assert!(result.is_err());
    assert_log(&logs, "failure", "spawn failed");
}

#[test]
fn traced_engine_execute_logs_status() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakeEngineProcess::new();
        fake.push_stdout(1, "{}");
        TracedEngineProcess::new(fake).execute(&command(), "x").await
    });

    assert_eq!(result.unwrap().status, Some(1));
    assert_log(&logs, "span name", "engine.execute");
    assert_log(&logs, "program", "program=node");
    assert_log(&logs, "cwd", "/project");
    assert_log(&logs, "completion", "engine finished");
}

#[test]
fn traced_engine_execute_logs_failure() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakeEngineProcess::new();
        fake.push_timeout();
        TracedEngineProcess::new(fake).execute(&command(), "x").await
    });

    assert!(result.is_err());
    assert_log(&logs, "failure", "engine failed");
}

#[tokio::test]
async fn traced_wrappers_delegate() {
    let fake = FakeEngineProcess::new();
    let traced = TracedEngineProcess::new(fake.clone());
    traced.execute(&command(), "body").await.unwrap();
    assert_eq!(fake.last_call().unwrap().stdin, "body");
}
