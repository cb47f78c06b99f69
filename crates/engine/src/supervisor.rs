// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker process lifecycle
//!
//! ```text
//! Stopped → Starting → Ready ⇄ Busy
//!              ↑          ↓      ↓
//!              └──── Crashed ←───┘
//! ```
//!
//! Every spawn gets a new generation. Reader tasks of older generations are
//! ignored, so a deliberate kill or restart is never mistaken for a crash.

use crate::error::SupervisorError;
use le_adapters::{KillMode, WorkerAdapter, WorkerControl};
use le_core::protocol::{encode, read_frame, write_message};
use le_core::{JobId, ProtocolError, WorkerEvent, WorkerRequest};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;

/// Worker lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Stopped,
    Starting,
    Ready,
    /// At least one request is in flight
    Busy,
    Crashed,
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerState::Stopped => write!(f, "stopped"),
            WorkerState::Starting => write!(f, "starting"),
            WorkerState::Ready => write!(f, "ready"),
            WorkerState::Busy => write!(f, "busy"),
            WorkerState::Crashed => write!(f, "crashed"),
        }
    }
}

/// Receives worker output
pub trait WorkerListener: Send + Sync + 'static {
    /// A job event arrived from the live worker
    fn on_event(&self, event: WorkerEvent);
    /// In-flight requests will never be answered
    fn on_crash(&self, reason: &str);
}

/// An encoded request, ready for framing
struct Outgoing {
    id: JobId,
    payload: Vec<u8>,
}

struct Live {
    requests: mpsc::UnboundedSender<Outgoing>,
    control: WorkerControl,
    pid: Option<u32>,
    version: String,
}

struct Inner {
    state: WorkerState,
    generation: u64,
    in_flight: usize,
    live: Option<Live>,
}

/// Owns the single worker process.
pub struct WorkerSupervisor<W> {
    adapter: W,
    listener: Arc<dyn WorkerListener>,
    inner: Arc<Mutex<Inner>>,
    start_lock: Arc<tokio::sync::Mutex<()>>,
    ready_timeout: Duration,
}

impl<W: Clone> Clone for WorkerSupervisor<W> {
    fn clone(&self) -> Self {
        Self {
            adapter: self.adapter.clone(),
            listener: Arc::clone(&self.listener),
            inner: Arc::clone(&self.inner),
            start_lock: Arc::clone(&self.start_lock),
            ready_timeout: self.ready_timeout,
        }
    }
}

impl<W: WorkerAdapter> WorkerSupervisor<W> {
    pub fn new(adapter: W, listener: Arc<dyn WorkerListener>) -> Self {
        Self {
            adapter,
            listener,
            inner: Arc::new(Mutex::new(Inner {
                state: WorkerState::Stopped,
                generation: 0,
                in_flight: 0,
                live: None,
            })),
            start_lock: Arc::new(tokio::sync::Mutex::new(())),
            ready_timeout: crate::env::worker_ready_timeout(),
        }
    }

    pub fn with_ready_timeout(mut self, timeout: Duration) -> Self {
        self.ready_timeout = timeout;
        self
    }

    pub fn state(&self) -> WorkerState {
        self.inner.lock().state
    }

    /// Process id of the live worker, if any
    pub fn pid(&self) -> Option<u32> {
        self.inner.lock().live.as_ref().and_then(|live| live.pid)
    }

    /// Version announced by the live worker
    pub fn version(&self) -> Option<String> {
        self.inner.lock().live.as_ref().map(|live| live.version.clone())
    }

    /// Start the worker unless one is already running.
    pub async fn start(&self) -> Result<(), SupervisorError> {
        let _guard = self.start_lock.lock().await;
        if matches!(self.state(), WorkerState::Ready | WorkerState::Busy) {
            return Ok(());
        }
        self.spawn_worker().await
    }

    /// Kill any live worker, reject its in-flight requests, start afresh.
    pub async fn restart(&self) -> Result<(), SupervisorError> {
        let _guard = self.start_lock.lock().await;
        {
            let mut inner = self.inner.lock();
            if let Some(mut live) = inner.live.take() {
                live.control.kill(KillMode::Force);
            }
            inner.generation += 1;
            inner.state = WorkerState::Stopped;
            inner.in_flight = 0;
            self.listener.on_crash("worker restarted");
        }
        self.spawn_worker().await
    }

    /// Stop the worker. In-flight requests are left unanswered.
    pub fn kill(&self, force: bool) {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        inner.state = WorkerState::Stopped;
        inner.in_flight = 0;
        if let Some(mut live) = inner.live.take() {
            let mode = if force {
                KillMode::Force
            } else {
                KillMode::Graceful
            };
            tracing::info!(pid = ?live.pid, ?mode, "stopping worker");
            // Dropping the request sender closes the worker's stdin
            live.control.kill(mode);
        }
    }

    /// Queue a request for the live worker.
    ///
    /// The request is encoded here, so one that cannot be framed fails on
    /// its own and never reaches the worker's input.
    pub fn send(&self, request: WorkerRequest) -> Result<(), SupervisorError> {
        let payload = encode(&request).map_err(SupervisorError::Encode)?;
        let mut inner = self.inner.lock();
        if !matches!(inner.state, WorkerState::Ready | WorkerState::Busy) {
            return Err(SupervisorError::NotReady(inner.state));
        }
        let live = inner.live.as_ref().ok_or(SupervisorError::NotReady(inner.state))?;
        live.requests
            .send(Outgoing {
                id: request.id,
                payload,
            })
            .map_err(|_| SupervisorError::Disconnected)?;
        inner.in_flight += 1;
        inner.state = WorkerState::Busy;
        Ok(())
    }

    /// Caller must hold `start_lock`.
    async fn spawn_worker(&self) -> Result<(), SupervisorError> {
        let generation = {
            let mut inner = self.inner.lock();
            inner.generation += 1;
            inner.state = WorkerState::Starting;
            inner.generation
        };

        let mut worker = match self.adapter.spawn().await {
            Ok(worker) => worker,
            Err(e) => {
                self.abandon_start(generation);
                return Err(e.into());
            }
        };

        let version = match self.handshake(&mut worker.output).await {
            Ok(version) => version,
            Err(e) => {
                worker.control.kill(KillMode::Force);
                self.abandon_start(generation);
                return Err(e);
            }
        };

        let (tx, rx) = mpsc::unbounded_channel();
        {
            let mut inner = self.inner.lock();
            if inner.generation != generation {
                worker.control.kill(KillMode::Force);
                return Err(SupervisorError::Stopped);
            }
            tracing::info!(pid = ?worker.pid, %version, generation, "worker ready");
            inner.live = Some(Live {
                requests: tx,
                control: worker.control,
                pid: worker.pid,
                version,
            });
            inner.in_flight = 0;
            inner.state = WorkerState::Ready;
        }

        tokio::spawn(write_loop(worker.input, rx));
        tokio::spawn(self.clone().read_loop(worker.output, generation));
        Ok(())
    }

    async fn handshake<R: AsyncRead + Unpin>(&self, output: &mut R) -> Result<String, SupervisorError> {
        let frame = tokio::time::timeout(self.ready_timeout, read_frame::<WorkerEvent, _>(output))
            .await
            .map_err(|_| {
                SupervisorError::Handshake(format!(
                    "no ready message within {}ms",
                    self.ready_timeout.as_millis()
                ))
            })?;
        match frame {
            Ok(WorkerEvent::Ready { version }) => Ok(version),
            Ok(other) => Err(SupervisorError::Handshake(format!(
                "expected ready message, got {other:?}"
            ))),
            Err(e) => Err(SupervisorError::Handshake(e.to_string())),
        }
    }

    fn abandon_start(&self, generation: u64) {
        let mut inner = self.inner.lock();
        if inner.generation == generation {
            inner.state = WorkerState::Stopped;
        }
    }

    async fn read_loop<R: AsyncRead + Unpin>(self, mut output: R, generation: u64) {
        loop {
            match read_frame::<WorkerEvent, _>(&mut output).await {
                Ok(WorkerEvent::Ready { .. }) => {
                    tracing::debug!(generation, "ignoring repeated ready message");
                }
                Ok(event) => {
                    {
                        let mut inner = self.inner.lock();
                        if inner.generation != generation {
                            return;
                        }
                        inner.in_flight = inner.in_flight.saturating_sub(1);
                        if inner.in_flight == 0 && inner.state == WorkerState::Busy {
                            inner.state = WorkerState::Ready;
                        }
                    }
                    self.listener.on_event(event);
                }
                Err(e) => {
                    let reason = match e {
                        ProtocolError::ConnectionClosed => "worker exited".to_string(),
                        other => other.to_string(),
                    };
                    self.handle_crash(generation, &reason);
                    return;
                }
            }
        }
    }

    fn handle_crash(&self, generation: u64, reason: &str) {
        {
            let mut inner = self.inner.lock();
            if inner.generation != generation
                || !matches!(inner.state, WorkerState::Ready | WorkerState::Busy)
            {
                return;
            }
            tracing::warn!(generation, reason, in_flight = inner.in_flight, "worker crashed");
            if let Some(mut live) = inner.live.take() {
                live.control.kill(KillMode::Force);
            }
            inner.state = WorkerState::Crashed;
            inner.in_flight = 0;
            // Rejected under the lock so no new request slips in between
            self.listener.on_crash(reason);
        }

        let supervisor = self.clone();
        tokio::spawn(async move {
            let _guard = supervisor.start_lock.lock().await;
            if supervisor.state() != WorkerState::Crashed {
                return;
            }
            if let Err(e) = supervisor.spawn_worker().await {
                tracing::error!(error = %e, "worker restart failed");
            }
        });
    }
}

async fn write_loop<Wr: AsyncWrite + Unpin>(
    mut input: Wr,
    mut requests: mpsc::UnboundedReceiver<Outgoing>,
) {
    while let Some(request) = requests.recv().await {
        // Only I/O failures get here; the reader notices the dead worker
        if let Err(e) = write_message(&mut input, &request.payload).await {
            tracing::warn!(id = %request.id, error = %e, "failed to write request");
            break;
        }
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
