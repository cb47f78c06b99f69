// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process fake worker for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{KillMode, WorkerAdapter, WorkerControl, WorkerError, WorkerProcess};
use async_trait::async_trait;
use le_core::protocol::{read_frame, write_frame};
use le_core::{
    FailureKind, JobFailure, JobMessages, JobResponse, RulesDiff, WorkerEvent, WorkerRequest,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::io::DuplexStream;
use tokio::sync::{mpsc, oneshot, Notify};

const PIPE_CAPACITY: usize = 256 * 1024;

/// Scripted reaction to the next request
#[derive(Debug, Clone)]
pub enum FakeReply {
    /// Answer with this response
    Respond(JobResponse),
    /// Answer with a job failure
    Fail(FailureKind, String),
    /// Exit without answering
    Crash,
    /// Keep the request until [`FakeWorkerAdapter::release_held`]
    Hold,
}

#[derive(Default)]
struct Signals {
    crash: Notify,
    release: Notify,
}

struct FakeWorkerState {
    replies: VecDeque<FakeReply>,
    requests: Vec<WorkerRequest>,
    kills: Vec<KillMode>,
    spawns: usize,
    spawn_failures: usize,
    announce_ready: bool,
    current: Option<Arc<Signals>>,
}

/// Worker adapter whose workers run as tasks over in-memory pipes.
///
/// Unscripted requests are answered by echoing the job contents back as a
/// text message, which makes correlation visible in assertions.
#[derive(Clone)]
pub struct FakeWorkerAdapter {
    inner: Arc<Mutex<FakeWorkerState>>,
}

impl Default for FakeWorkerAdapter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeWorkerState {
                replies: VecDeque::new(),
                requests: Vec::new(),
                kills: Vec::new(),
                spawns: 0,
                spawn_failures: 0,
                announce_ready: true,
                current: None,
            })),
        }
    }
}

impl FakeWorkerAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the reaction to the next unanswered request
    pub fn push_reply(&self, reply: FakeReply) {
        self.inner.lock().replies.push_back(reply);
    }

    /// Make the next `count` spawns fail
    pub fn fail_spawns(&self, count: usize) {
        self.inner.lock().spawn_failures = count;
    }

    /// Whether new workers send the `Ready` handshake
    pub fn set_announce_ready(&self, announce: bool) {
        self.inner.lock().announce_ready = announce;
    }

    /// Make the current worker exit as if it crashed
    pub fn crash(&self) {
        if let Some(signals) = self.inner.lock().current.take() {
            signals.crash.notify_one();
        }
    }

    /// Answer every held request, most recent first
    pub fn release_held(&self) {
        if let Some(signals) = self.inner.lock().current.as_ref() {
            signals.release.notify_one();
        }
    }

    pub fn spawn_count(&self) -> usize {
        self.inner.lock().spawns
    }

    pub fn requests(&self) -> Vec<WorkerRequest> {
        self.inner.lock().requests.clone()
    }

    pub fn kills(&self) -> Vec<KillMode> {
        self.inner.lock().kills.clone()
    }
}

#[async_trait]
impl WorkerAdapter for FakeWorkerAdapter {
    async fn spawn(&self) -> Result<WorkerProcess, WorkerError> {
        let (signals, announce) = {
            let mut inner = self.inner.lock();
            inner.spawns += 1;
            if inner.spawn_failures > 0 {
                inner.spawn_failures -= 1;
                return Err(WorkerError::Spawn {
                    program: "fake-worker".to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "scripted failure"),
                });
            }
            let signals = Arc::new(Signals::default());
            inner.current = Some(Arc::clone(&signals));
            (signals, inner.announce_ready)
        };

        let (host_input, worker_input) = tokio::io::duplex(PIPE_CAPACITY);
        let (worker_output, host_output) = tokio::io::duplex(PIPE_CAPACITY);
        let (tx, rx) = oneshot::channel();

        let worker = FakeWorker {
            state: Arc::clone(&self.inner),
            signals,
            output: worker_output,
            held: Vec::new(),
        };
        tokio::spawn(worker.run(worker_input, rx, announce));

        Ok(WorkerProcess {
            pid: None,
            input: Box::new(host_input),
            output: Box::new(host_output),
            control: WorkerControl::new(tx),
        })
    }
}

struct FakeWorker {
    state: Arc<Mutex<FakeWorkerState>>,
    signals: Arc<Signals>,
    output: DuplexStream,
    held: Vec<WorkerRequest>,
}

impl FakeWorker {
    async fn run(
        mut self,
        input: DuplexStream,
        mut control: oneshot::Receiver<KillMode>,
        announce: bool,
    ) {
        if announce {
            let ready = WorkerEvent::Ready {
                version: "fake".to_string(),
            };
            if write_frame(&mut self.output, &ready).await.is_err() {
                return;
            }
        }

        // Frames are read on their own task so the select below stays cancel-safe
        let (frame_tx, mut frames) = mpsc::channel::<WorkerRequest>(64);
        tokio::spawn(async move {
            let mut input = input;
            while let Ok(request) = read_frame::<WorkerRequest, _>(&mut input).await {
                if frame_tx.send(request).await.is_err() {
                    break;
                }
            }
        });

        let mut control_open = true;
        loop {
            tokio::select! {
                request = frames.recv() => {
                    let Some(request) = request else { return };
                    if !self.handle(request).await {
                        return;
                    }
                }
                _ = self.signals.crash.notified() => return,
                _ = self.signals.release.notified() => {
                    while let Some(request) = self.held.pop() {
                        let event = echo(&request);
                        if write_frame(&mut self.output, &event).await.is_err() {
                            return;
                        }
                    }
                }
                mode = &mut control, if control_open => match mode {
                    Ok(mode) => {
                        self.state.lock().kills.push(mode);
                        return;
                    }
                    Err(_) => control_open = false,
                },
            }
        }
    }

    /// Returns false when the worker should exit.
    async fn handle(&mut self, request: WorkerRequest) -> bool {
        let reply = {
            let mut state = self.state.lock();
            state.requests.push(request.clone());
            state.replies.pop_front()
        };
        let event = match reply {
            None => echo(&request),
            Some(FakeReply::Respond(response)) => WorkerEvent::Done {
                id: request.id,
                response,
            },
            Some(FakeReply::Fail(kind, message)) => WorkerEvent::Failed {
                id: request.id,
                failure: JobFailure { kind, message },
            },
            Some(FakeReply::Crash) => return false,
            Some(FakeReply::Hold) => {
                self.held.push(request);
                return true;
            }
        };
        write_frame(&mut self.output, &event).await.is_ok()
    }
}

fn echo(request: &WorkerRequest) -> WorkerEvent {
    WorkerEvent::Done {
        id: request.id.clone(),
        response: JobResponse {
            messages: JobMessages::Text(request.job.contents.clone()),
            rules_diff: RulesDiff::new(),
        },
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
