// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_helpers::wait_until;
use le_adapters::{FakeReply, FakeWorkerAdapter};
use le_core::test_support::lint_job;
use le_core::JobId;

#[derive(Default)]
struct RecordingListener {
    events: Mutex<Vec<WorkerEvent>>,
    crashes: Mutex<Vec<String>>,
}

impl WorkerListener for RecordingListener {
    fn on_event(&self, event: WorkerEvent) {
        self.events.lock().push(event);
    }

    fn on_crash(&self, reason: &str) {
        self.crashes.lock().push(reason.to_string());
    }
}

fn setup() -> (
    FakeWorkerAdapter,
    Arc<RecordingListener>,
    WorkerSupervisor<FakeWorkerAdapter>,
) {
    let adapter = FakeWorkerAdapter::new();
    let listener = Arc::new(RecordingListener::default());
    let supervisor = WorkerSupervisor::new(adapter.clone(), listener.clone())
        .with_ready_timeout(Duration::from_millis(500));
    (adapter, listener, supervisor)
}

fn request(id: &str) -> WorkerRequest {
    WorkerRequest {
        id: JobId::new(id),
        job: lint_job("/proj/a.js", id),
    }
}

#[tokio::test]
async fn starts_stopped_and_becomes_ready() {
    let (_, _, supervisor) = setup();
    assert_eq!(supervisor.state(), WorkerState::Stopped);
    assert_eq!(supervisor.version(), None);

    supervisor.start().await.unwrap();
    assert_eq!(supervisor.state(), WorkerState::Ready);
    assert_eq!(supervisor.version().as_deref(), Some("fake"));
}

#[tokio::test]
async fn send_requires_a_running_worker() {
    let (_, _, supervisor) = setup();
    let err = supervisor.send(request("job-1")).unwrap_err();
    assert!(matches!(err, SupervisorError::NotReady(WorkerState::Stopped)));
}

#[tokio::test]
async fn busy_while_requests_are_in_flight() {
    let (adapter, listener, supervisor) = setup();
    adapter.push_reply(FakeReply::Hold);
    supervisor.start().await.unwrap();

    supervisor.send(request("job-1")).unwrap();
    assert_eq!(supervisor.state(), WorkerState::Busy);

    adapter_wait(&adapter, 1).await;
    adapter.release_held();
    wait_until("event", || listener.events.lock().len() == 1).await;
    assert_eq!(supervisor.state(), WorkerState::Ready);
}

async fn adapter_wait(adapter: &FakeWorkerAdapter, n: usize) {
    wait_until("requests", || adapter.requests().len() == n).await;
}

#[tokio::test]
async fn crash_notifies_listener_and_restarts() {
    let (adapter, listener, supervisor) = setup();
    supervisor.start().await.unwrap();

    adapter.crash();
    wait_until("crash", || listener.crashes.lock().len() == 1).await;
    assert_eq!(listener.crashes.lock()[0], "worker exited");

    wait_until("restart", || supervisor.state() == WorkerState::Ready).await;
    assert_eq!(adapter.spawn_count(), 2);
}

#[tokio::test]
async fn deliberate_kill_is_not_a_crash() {
    let (adapter, listener, supervisor) = setup();
    supervisor.start().await.unwrap();

    supervisor.kill(true);
    wait_until("kill", || !adapter.kills().is_empty()).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert!(listener.crashes.lock().is_empty());
    assert_eq!(supervisor.state(), WorkerState::Stopped);
    assert_eq!(adapter.spawn_count(), 1);
}

#[tokio::test]
async fn events_from_a_restarted_worker_are_ignored() {
    let (adapter, listener, supervisor) = setup();
    adapter.push_reply(FakeReply::Hold);
    supervisor.start().await.unwrap();
    supervisor.send(request("job-1")).unwrap();
    adapter_wait(&adapter, 1).await;

    supervisor.restart().await.unwrap();
    assert_eq!(listener.crashes.lock().as_slice(), ["worker restarted"]);

    supervisor.send(request("job-2")).unwrap();
    wait_until("event", || listener.events.lock().len() == 1).await;
    let events = listener.events.lock();
    assert_eq!(events[0].job_id().map(|id| id.as_str()), Some("job-2"));
}

#[tokio::test]
async fn pid_is_absent_for_in_process_workers() {
    let (_, _, supervisor) = setup();
    supervisor.start().await.unwrap();
    assert_eq!(supervisor.pid(), None);
}
