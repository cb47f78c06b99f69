// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::engine::{EngineCommand, EngineOutput, EngineProcess, EngineProcessError};
use crate::worker::{WorkerAdapter, WorkerError, WorkerProcess};
use async_trait::async_trait;
use tracing::Instrument;

/// Wrapper that adds tracing to any WorkerAdapter
#[derive(Clone)]
pub struct TracedWorkerAdapter<W> {
    inner: W,
}

impl<W> TracedWorkerAdapter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<W: WorkerAdapter> WorkerAdapter for TracedWorkerAdapter<W> {
    async fn spawn(&self) -> Result<WorkerProcess, WorkerError> {
        async {
            tracing::info!("starting");
            let start = std::time::Instant::now();
            let result = self.inner.spawn().await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(worker) => tracing::info!(pid = ?worker.pid, elapsed_ms, "worker spawned"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "spawn failed"),
            }
            result
        }
        .instrument(tracing::info_span!("worker.spawn"))
        .await
    }
}

/// Wrapper that adds tracing to any EngineProcess
#[derive(Clone)]
pub struct TracedEngineProcess<E> {
    inner: E,
}

impl<E> TracedEngineProcess<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<E: EngineProcess> EngineProcess for TracedEngineProcess<E> {
    async fn execute(
        &self,
        command: &EngineCommand,
        stdin: &str,
    ) -> Result<EngineOutput, EngineProcessError> {
        async {
            tracing::debug!(args = ?command.args, stdin_len = stdin.len(), "executing");
            let start = std::time::Instant::now();
            let result = self.inner.execute(command, stdin).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(output) => tracing::info!(
                    status = ?output.status,
                    stdout_len = output.stdout.len(),
                    elapsed_ms,
                    "engine finished"
                ),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "engine failed"),
            }
            result
        }
        .instrument(tracing::info_span!(
            "engine.execute",
            program = %command.program,
            cwd = %command.cwd.display()
        ))
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
