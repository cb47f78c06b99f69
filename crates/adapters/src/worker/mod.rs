// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker process spawning
//!
//! A [`WorkerAdapter`] starts one worker and hands back its byte streams:
//! the host writes length-prefixed requests to `input` and reads events from
//! `output`. Process lifetime is steered through [`WorkerControl`].

mod process;

pub use process::ProcessWorkerAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeReply, FakeWorkerAdapter};

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::oneshot;

/// Errors from spawning a worker
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("failed to spawn worker `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("worker has no {0} pipe")]
    MissingPipe(&'static str),
}

/// How a worker should be stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillMode {
    /// Let the worker exit on stdin EOF, killing it after a grace period
    Graceful,
    /// Kill immediately
    Force,
}

/// Kill switch for one spawned worker. Dropping it without calling
/// [`kill`](Self::kill) behaves like a graceful stop.
#[derive(Debug)]
pub struct WorkerControl {
    tx: Option<oneshot::Sender<KillMode>>,
}

impl WorkerControl {
    pub fn new(tx: oneshot::Sender<KillMode>) -> Self {
        Self { tx: Some(tx) }
    }

    /// Request termination. Only the first call has an effect.
    pub fn kill(&mut self, mode: KillMode) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(mode);
        }
    }
}

/// A running worker
pub struct WorkerProcess {
    /// OS process id, when the worker is a real process
    pub pid: Option<u32>,
    pub input: Box<dyn AsyncWrite + Send + Unpin>,
    pub output: Box<dyn AsyncRead + Send + Unpin>,
    pub control: WorkerControl,
}

impl std::fmt::Debug for WorkerProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerProcess")
            .field("pid", &self.pid)
            .finish_non_exhaustive()
    }
}

/// Starts worker processes
#[async_trait]
pub trait WorkerAdapter: Clone + Send + Sync + 'static {
    async fn spawn(&self) -> Result<WorkerProcess, WorkerError>;
}
