// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job dispatch over the supervised worker

use crate::error::JobError;
use crate::pending::PendingJobs;
use crate::supervisor::{WorkerListener, WorkerState, WorkerSupervisor};
use le_adapters::WorkerAdapter;
use le_core::{IdGen, JobResponse, JobSpec, UuidIdGen, WorkerRequest};
use std::sync::Arc;
use std::time::Duration;

/// Sends jobs to the worker and routes each response to its caller.
///
/// Requests are pipelined: any number of callers may wait at once, and
/// responses are matched by correlation id rather than arrival order.
pub struct JobDispatcher<W, G = UuidIdGen> {
    supervisor: WorkerSupervisor<W>,
    pending: Arc<PendingJobs>,
    ids: G,
}

impl<W: WorkerAdapter, G: IdGen> JobDispatcher<W, G> {
    pub fn new(adapter: W, ids: G) -> Self {
        let pending = Arc::new(PendingJobs::default());
        let listener: Arc<dyn WorkerListener> = pending.clone();
        let supervisor = WorkerSupervisor::new(adapter, listener);
        Self {
            supervisor,
            pending,
            ids,
        }
    }

    pub fn with_ready_timeout(mut self, timeout: Duration) -> Self {
        self.supervisor = self.supervisor.with_ready_timeout(timeout);
        self
    }

    /// Start the worker ahead of the first job
    pub async fn start(&self) -> Result<(), JobError> {
        Ok(self.supervisor.start().await?)
    }

    pub async fn restart(&self) -> Result<(), JobError> {
        Ok(self.supervisor.restart().await?)
    }

    /// Stop the worker; callers still waiting are not answered
    pub fn kill(&self, force: bool) {
        self.supervisor.kill(force);
    }

    pub fn state(&self) -> WorkerState {
        self.supervisor.state()
    }

    pub fn supervisor(&self) -> &WorkerSupervisor<W> {
        &self.supervisor
    }

    /// Jobs waiting on a response
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub async fn send_job(&self, job: JobSpec) -> Result<JobResponse, JobError> {
        let id = self.ids.next_id();
        self.supervisor.start().await?;

        let rx = self.pending.insert(id.clone());
        tracing::debug!(%id, kind = %job.kind, file = %job.file_path.display(), "dispatching job");
        if let Err(e) = self.supervisor.send(WorkerRequest {
            id: id.clone(),
            job,
        }) {
            self.pending.remove(&id);
            return Err(e.into());
        }

        match rx.await {
            Ok(result) => result,
            // Only reachable if the table itself is dropped
            Err(_) => Err(JobError::WorkerCrash("dispatcher shut down".to_string())),
        }
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
