// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake engine loader and process for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{
    EngineCommand, EngineHandle, EngineLoader, EngineOutput, EngineProcess, EngineProcessError,
    LoadError,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;

struct FakeLoaderState {
    installed: HashMap<PathBuf, Option<String>>,
    loads: Vec<PathBuf>,
}

/// Loader over a fixed set of installed engine directories
#[derive(Clone)]
pub struct FakeEngineLoader {
    inner: Arc<Mutex<FakeLoaderState>>,
}

impl Default for FakeEngineLoader {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeLoaderState {
                installed: HashMap::new(),
                loads: Vec::new(),
            })),
        }
    }
}

impl FakeEngineLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `dir` as holding a loadable engine
    pub fn install(&self, dir: impl Into<PathBuf>, version: Option<&str>) -> &Self {
        self.inner
            .lock()
            .installed
            .insert(dir.into(), version.map(String::from));
        self
    }

    pub fn uninstall(&self, dir: &Path) {
        self.inner.lock().installed.remove(dir);
    }

    /// Directories passed to `load`, in order
    pub fn loads(&self) -> Vec<PathBuf> {
        self.inner.lock().loads.clone()
    }
}

impl EngineLoader for FakeEngineLoader {
    fn load(&self, dir: &Path) -> Result<EngineHandle, LoadError> {
        let mut inner = self.inner.lock();
        inner.loads.push(dir.to_path_buf());
        match inner.installed.get(dir) {
            Some(version) => Ok(EngineHandle {
                dir: dir.to_path_buf(),
                entry_script: dir.join("bin/eslint.js"),
                version: version.clone(),
            }),
            None => Err(LoadError::NotFound(dir.join("lib/cli.js"))),
        }
    }
}

/// Recorded engine execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCall {
    pub command: EngineCommand,
    pub stdin: String,
}

enum Scripted {
    Output(EngineOutput),
    SpawnFailure,
    Timeout,
}

struct FakeProcessState {
    queue: VecDeque<Scripted>,
    default: EngineOutput,
    calls: Vec<EngineCall>,
}

/// Engine process replaying scripted outputs.
///
/// Queued results are consumed first; once the queue is empty every call
/// gets the default output (an empty report with exit code 0).
#[derive(Clone)]
pub struct FakeEngineProcess {
    inner: Arc<Mutex<FakeProcessState>>,
}

impl Default for FakeEngineProcess {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeProcessState {
                queue: VecDeque::new(),
                default: EngineOutput {
                    status: Some(0),
                    stdout: r#"{"messages":[],"output":null,"fixable":[]}"#.to_string(),
                    stderr: String::new(),
                },
                calls: Vec::new(),
            })),
        }
    }
}

impl FakeEngineProcess {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful run printing `stdout` with the given exit code
    pub fn push_stdout(&self, status: i32, stdout: &str) {
        self.push_output(EngineOutput {
            status: Some(status),
            stdout: stdout.to_string(),
            stderr: String::new(),
        });
    }

    pub fn push_output(&self, output: EngineOutput) {
        self.inner.lock().queue.push_back(Scripted::Output(output));
    }

    /// Queue a run whose program cannot be started
    pub fn push_spawn_failure(&self) {
        self.inner.lock().queue.push_back(Scripted::SpawnFailure);
    }

    pub fn push_timeout(&self) {
        self.inner.lock().queue.push_back(Scripted::Timeout);
    }

    pub fn set_default(&self, output: EngineOutput) {
        self.inner.lock().default = output;
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.inner.lock().calls.clone()
    }

    pub fn last_call(&self) -> Option<EngineCall> {
        self.inner.lock().calls.last().cloned()
    }
}

#[async_trait]
impl EngineProcess for FakeEngineProcess {
    async fn execute(
        &self,
        command: &EngineCommand,
        stdin: &str,
    ) -> Result<EngineOutput, EngineProcessError> {
        let mut inner = self.inner.lock();
        inner.calls.push(EngineCall {
            command: command.clone(),
            stdin: stdin.to_string(),
        });
        match inner.queue.pop_front() {
            Some(Scripted::Output(output)) => Ok(output),
            Some(Scripted::SpawnFailure) => Err(EngineProcessError::Spawn {
                program: command.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not installed"),
            }),
            Some(Scripted::Timeout) => Err(EngineProcessError::Timeout(0)),
            None => Ok(inner.default.clone()),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
