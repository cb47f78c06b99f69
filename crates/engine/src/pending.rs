// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Correlation table for dispatched jobs

use crate::error::JobError;
use crate::supervisor::WorkerListener;
use le_core::{JobId, JobResponse, WorkerEvent};
use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::sync::oneshot;

pub(crate) type JobResult = Result<JobResponse, JobError>;

/// Callers waiting on a response, keyed by correlation id
#[derive(Default)]
pub struct PendingJobs {
    waiting: Mutex<HashMap<JobId, oneshot::Sender<JobResult>>>,
}

impl PendingJobs {
    pub(crate) fn insert(&self, id: JobId) -> oneshot::Receiver<JobResult> {
        let (tx, rx) = oneshot::channel();
        self.waiting.lock().insert(id, tx);
        rx
    }

    pub(crate) fn remove(&self, id: &JobId) {
        self.waiting.lock().remove(id);
    }

    pub fn len(&self) -> usize {
        self.waiting.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn resolve(&self, id: &JobId, result: JobResult) {
        let Some(tx) = self.waiting.lock().remove(id) else {
            tracing::warn!(%id, "response for unknown job dropped");
            return;
        };
        // The caller may have gone away
        let _ = tx.send(result);
    }
}

impl WorkerListener for PendingJobs {
    fn on_event(&self, event: WorkerEvent) {
        match event {
            WorkerEvent::Done { id, response } => self.resolve(&id, Ok(response)),
            WorkerEvent::Failed { id, failure } => self.resolve(&id, Err(failure.into())),
            WorkerEvent::Ready { .. } => {}
        }
    }

    fn on_crash(&self, reason: &str) {
        let drained: Vec<_> = self.waiting.lock().drain().collect();
        if !drained.is_empty() {
            tracing::warn!(count = drained.len(), reason, "rejecting pending jobs");
        }
        for (_, tx) in drained {
            let _ = tx.send(Err(JobError::WorkerCrash(reason.to_string())));
        }
    }
}

#[cfg(test)]
#[path = "pending_tests.rs"]
mod tests;
