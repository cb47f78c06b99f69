// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine installation loading and execution
//!
//! Loading answers "is there a usable ESLint in this directory?" and yields an
//! [`EngineHandle`]. Execution runs one invocation of a loaded engine with the
//! job contents on stdin.

mod loader;
mod process;

pub use loader::FsEngineLoader;
pub use process::SystemEngineProcess;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{EngineCall, FakeEngineLoader, FakeEngineProcess};

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Where a loaded engine came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineSource {
    /// The project's own `node_modules`
    Local,
    /// The package manager's global prefix
    Global,
    /// The copy shipped alongside this tool
    Bundled,
}

impl std::fmt::Display for EngineSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineSource::Local => write!(f, "local"),
            EngineSource::Global => write!(f, "global"),
            EngineSource::Bundled => write!(f, "bundled"),
        }
    }
}

/// A loadable engine installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineHandle {
    /// Package directory (`.../node_modules/eslint`)
    pub dir: PathBuf,
    /// Script run by the entry executable
    pub entry_script: PathBuf,
    /// Package version, if readable
    pub version: Option<String>,
}

/// Errors from loading an engine installation
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot find module `{}`", .0.display())]
    NotFound(PathBuf),
    #[error("failed to inspect {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Strategy for loading an engine from a computed directory
pub trait EngineLoader: Clone + Send + Sync + 'static {
    fn load(&self, dir: &Path) -> Result<EngineHandle, LoadError>;
}

/// One engine process invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCommand {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub env: Vec<(String, String)>,
}

/// Captured engine output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
    /// Exit code, `None` when killed by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Errors from running the engine
#[derive(Debug, Error)]
pub enum EngineProcessError {
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("engine timed out after {0}ms")]
    Timeout(u64),
}

/// Runs engine invocations
#[async_trait]
pub trait EngineProcess: Clone + Send + Sync + 'static {
    async fn execute(
        &self,
        command: &EngineCommand,
        stdin: &str,
    ) -> Result<EngineOutput, EngineProcessError>;
}
