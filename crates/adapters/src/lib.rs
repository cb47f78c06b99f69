// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: filesystem walks, external commands, engine
//! loading and execution, worker processes

pub mod command;
pub mod engine;
mod env;
pub mod finder;
pub mod subprocess;
pub mod traced;
pub mod worker;

pub use command::{CommandError, CommandOutput, CommandRunner, SystemCommandRunner};
pub use engine::{
    EngineCommand, EngineHandle, EngineLoader, EngineOutput, EngineProcess, EngineProcessError,
    EngineSource, FsEngineLoader, LoadError, SystemEngineProcess,
};
pub use finder::{FsPathFinder, PathFinder};
pub use traced::{TracedEngineProcess, TracedWorkerAdapter};
pub use worker::{
    KillMode, ProcessWorkerAdapter, WorkerAdapter, WorkerControl, WorkerError, WorkerProcess,
};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use command::{CommandCall, FakeCommandRunner};
#[cfg(any(test, feature = "test-support"))]
pub use engine::{EngineCall, FakeEngineLoader, FakeEngineProcess};
#[cfg(any(test, feature = "test-support"))]
pub use finder::FakePathFinder;
#[cfg(any(test, feature = "test-support"))]
pub use worker::{FakeReply, FakeWorkerAdapter};
