// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for job resolution and dispatch

use crate::supervisor::WorkerState;
use le_adapters::WorkerError;
use le_core::{FailureKind, JobFailure, ProtocolError};
use std::path::PathBuf;
use thiserror::Error;

/// Message used when a global install cannot be loaded
pub const GLOBAL_NOT_FOUND: &str =
    "ESLint not found, Please install or make sure the PATH environment variable is set correctly";

/// Errors from locating an engine installation
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{0}")]
    EngineNotFound(String),
    #[error("Unable to execute `npm get prefix`. Please make sure the PATH environment variable is set correctly ({0})")]
    PrefixQuery(String),
    #[error("failed to search from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ResolveError {
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            ResolveError::EngineNotFound(_) => FailureKind::EngineNotFound,
            ResolveError::PrefixQuery(_) | ResolveError::Io { .. } => FailureKind::Resolution,
        }
    }
}

impl From<ResolveError> for JobFailure {
    fn from(err: ResolveError) -> Self {
        JobFailure {
            kind: err.failure_kind(),
            message: err.to_string(),
        }
    }
}

/// Errors from the worker supervisor
#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error(transparent)]
    Spawn(#[from] WorkerError),
    #[error("worker handshake failed: {0}")]
    Handshake(String),
    #[error("worker was stopped during startup")]
    Stopped,
    #[error("worker is not accepting jobs ({0})")]
    NotReady(WorkerState),
    #[error("worker request channel closed")]
    Disconnected,
    #[error("request could not be encoded: {0}")]
    Encode(#[source] ProtocolError),
}

/// Errors delivered to a job's caller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    #[error("{0}")]
    EngineNotFound(String),
    #[error("{0}")]
    Resolution(String),
    #[error("worker crashed: {0}")]
    WorkerCrash(String),
    #[error("failed to start worker: {0}")]
    WorkerStart(String),
    #[error("{0}")]
    Engine(String),
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl From<JobFailure> for JobError {
    fn from(failure: JobFailure) -> Self {
        match failure.kind {
            FailureKind::EngineNotFound => JobError::EngineNotFound(failure.message),
            FailureKind::Resolution => JobError::Resolution(failure.message),
            FailureKind::Engine => JobError::Engine(failure.message),
        }
    }
}

impl From<SupervisorError> for JobError {
    fn from(err: SupervisorError) -> Self {
        match err {
            SupervisorError::Spawn(_) | SupervisorError::Handshake(_) | SupervisorError::Stopped => {
                JobError::WorkerStart(err.to_string())
            }
            SupervisorError::NotReady(_) | SupervisorError::Disconnected => {
                JobError::WorkerCrash(err.to_string())
            }
            SupervisorError::Encode(e) => JobError::Protocol(e.to_string()),
        }
    }
}
