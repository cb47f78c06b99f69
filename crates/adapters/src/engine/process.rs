// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine execution through a real child process

use super::{EngineCommand, EngineOutput, EngineProcess, EngineProcessError};
use crate::subprocess::{run_with_stdin, StdinRunError};
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;

/// Runs the engine as a child process with the job contents on stdin.
///
/// Runs are unbounded unless a timeout is set, either here or through
/// `LE_ENGINE_TIMEOUT_MS` for the default instance.
#[derive(Clone, Debug)]
pub struct SystemEngineProcess {
    timeout: Option<Duration>,
}

impl SystemEngineProcess {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl Default for SystemEngineProcess {
    fn default() -> Self {
        Self::new(crate::env::engine_timeout())
    }
}

#[async_trait]
impl EngineProcess for SystemEngineProcess {
    async fn execute(
        &self,
        command: &EngineCommand,
        stdin: &str,
    ) -> Result<EngineOutput, EngineProcessError> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args).current_dir(&command.cwd);
        for (key, value) in &command.env {
            cmd.env(key, value);
        }

        let output = run_with_stdin(cmd, stdin, self.timeout)
            .await
            .map_err(|e| match e {
                StdinRunError::Io(source) => EngineProcessError::Spawn {
                    program: command.program.clone(),
                    source,
                },
                StdinRunError::Timeout => EngineProcessError::Timeout(
                    self.timeout.map_or(0, |t| t.as_millis() as u64),
                ),
            })?;

        Ok(EngineOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
