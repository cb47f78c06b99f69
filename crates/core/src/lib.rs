// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! le-core: shared types for the lint job pipeline

pub mod config;
pub mod id;
pub mod job;
pub mod protocol;
pub mod rules;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::{default_settings_path, EngineConfig, Settings, SettingsError, SettingsStore};
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use job::{
    Diagnostic, Fix, JobId, JobKind, JobMessages, JobResponse, JobSpec, RuleSuppressionSet,
    RulesDiff,
};
pub use protocol::{
    FailureKind, JobFailure, ProtocolError, WorkerEvent, WorkerRequest, PROTOCOL_VERSION,
};
pub use rules::RuleState;
