// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake command runner for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{CommandError, CommandOutput, CommandRunner};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Recorded command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCall {
    pub program: String,
    pub args: Vec<String>,
}

struct FakeCommandState {
    outputs: HashMap<String, CommandOutput>,
    calls: Vec<CommandCall>,
}

/// Fake command runner: replays canned output per program, records calls.
/// Programs without canned output fail as if not installed.
#[derive(Clone)]
pub struct FakeCommandRunner {
    inner: Arc<Mutex<FakeCommandState>>,
}

impl Default for FakeCommandRunner {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeCommandState {
                outputs: HashMap::new(),
                calls: Vec::new(),
            })),
        }
    }
}

impl FakeCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Successful run printing `stdout`
    pub fn set_stdout(&self, program: &str, stdout: &str) {
        self.set_output(
            program,
            CommandOutput {
                status: Some(0),
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
    }

    pub fn set_output(&self, program: &str, output: CommandOutput) {
        self.inner
            .lock()
            .outputs
            .insert(program.to_string(), output);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<CommandCall> {
        self.inner.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().calls.len()
    }
}

impl CommandRunner for FakeCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError> {
        let mut inner = self.inner.lock();
        inner.calls.push(CommandCall {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        });
        inner
            .outputs
            .get(program)
            .cloned()
            .ok_or_else(|| CommandError::Spawn {
                program: program.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not installed"),
            })
    }
}
