// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Correlation id generation for dispatched jobs.
//!
//! The dispatcher takes its generator as a type parameter: the host uses
//! random UUIDs so ids never repeat across worker restarts, while tests plug
//! in [`SequentialIdGen`] to assert on `job-1`, `job-2`, ... in the requests
//! a fake worker records.

use crate::job::JobId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Source of job correlation ids; every call yields an id not seen before
pub trait IdGen: Clone + Send + Sync + 'static {
    fn next_id(&self) -> JobId;
}

#[derive(Clone, Default)]
pub struct UuidIdGen;

impl IdGen for UuidIdGen {
    fn next_id(&self) -> JobId {
        JobId::new(uuid::Uuid::new_v4().to_string())
    }
}

/// Deterministic ids (`<prefix>-1`, `<prefix>-2`, ...). Clones share one
/// counter, so ids stay unique when the generator is handed around.
#[derive(Clone)]
pub struct SequentialIdGen {
    prefix: String,
    counter: Arc<AtomicU64>,
}

impl SequentialIdGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialIdGen {
    fn default() -> Self {
        Self::new("job")
    }
}

impl IdGen for SequentialIdGen {
    fn next_id(&self) -> JobId {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        JobId::new(format!("{}-{n}", self.prefix))
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
