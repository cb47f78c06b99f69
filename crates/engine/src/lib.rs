// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! le-engine: engine resolution, invocation building, and job dispatch
//! over a supervised worker process

pub mod config_locator;
mod dispatcher;
pub mod env;
mod error;
mod host;
pub mod invocation;
mod pending;
pub mod resolver;
mod runner;
mod supervisor;

#[cfg(test)]
mod test_helpers;

pub use config_locator::ConfigLocator;
pub use dispatcher::JobDispatcher;
pub use error::{JobError, ResolveError, SupervisorError, GLOBAL_NOT_FOUND};
pub use host::{Buffer, FixOutcome, Host, LintOutcome, REMOTE_FILE_WARNING, SAVE_BEFORE_FIXING};
pub use invocation::{Invocation, InvocationBuilder};
pub use pending::PendingJobs;
pub use resolver::{PathResolver, ResolvedEngine};
pub use runner::{JobRunner, FIX_COMPLETE, FIX_SKIPPED};
pub use supervisor::{WorkerListener, WorkerState, WorkerSupervisor};
