// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! le-worker: long-lived process that runs lint and fix jobs for the host.
//!
//! Jobs arrive on stdin as length-prefixed JSON frames and results leave on
//! stdout the same way. Logs go to `worker.log` under the state directory.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod env;
pub mod reporter;
mod serve;

pub use serve::serve;

use thiserror::Error;

/// Prefix of the line appended to the log before tracing starts
pub const STARTUP_MARKER_PREFIX: &str = "--- le-worker: starting (pid: ";

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("could not determine state directory")]
    NoStateDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Protocol(#[from] le_core::ProtocolError),
}
