// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker running as a child process

use super::{KillMode, WorkerAdapter, WorkerControl, WorkerError, WorkerProcess};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStderr, Command};
use tokio::sync::oneshot;

/// Spawns the worker binary with piped stdio.
///
/// A monitor task owns the child: it reaps the process when it exits on its
/// own and carries out kill requests from [`WorkerControl`].
#[derive(Clone, Debug)]
pub struct ProcessWorkerAdapter {
    program: PathBuf,
    args: Vec<String>,
    env: Vec<(String, String)>,
    grace: Duration,
}

impl ProcessWorkerAdapter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            grace: crate::env::worker_kill_grace(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    pub fn program(&self) -> &std::path::Path {
        &self.program
    }
}

#[async_trait]
impl WorkerAdapter for ProcessWorkerAdapter {
    async fn spawn(&self) -> Result<WorkerProcess, WorkerError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .envs(self.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| WorkerError::Spawn {
            program: self.program.display().to_string(),
            source,
        })?;
        let pid = child.id();

        let input = child.stdin.take().ok_or(WorkerError::MissingPipe("stdin"))?;
        let output = child
            .stdout
            .take()
            .ok_or(WorkerError::MissingPipe("stdout"))?;
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(drain_stderr(stderr, pid));
        }

        let (tx, rx) = oneshot::channel();
        tokio::spawn(monitor(child, rx, self.grace, pid));

        Ok(WorkerProcess {
            pid,
            input: Box::new(input),
            output: Box::new(output),
            control: WorkerControl::new(tx),
        })
    }
}

async fn drain_stderr(stderr: ChildStderr, pid: Option<u32>) {
    let mut lines = BufReader::new(stderr).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        tracing::debug!(target: "le_worker", ?pid, "{line}");
    }
}

async fn monitor(
    mut child: Child,
    rx: oneshot::Receiver<KillMode>,
    grace: Duration,
    pid: Option<u32>,
) {
    let mode = tokio::select! {
        status = child.wait() => {
            match status {
                Ok(status) => tracing::info!(?pid, %status, "worker exited"),
                Err(e) => tracing::warn!(?pid, error = %e, "failed to wait for worker"),
            }
            return;
        }
        mode = rx => mode.unwrap_or(KillMode::Graceful),
    };

    if mode == KillMode::Graceful {
        if let Ok(status) = tokio::time::timeout(grace, child.wait()).await {
            tracing::info!(?pid, ?status, "worker stopped");
            return;
        }
        tracing::warn!(?pid, grace_ms = grace.as_millis() as u64, "worker ignored stop, killing");
    }

    if let Err(e) = child.start_kill() {
        tracing::warn!(?pid, error = %e, "failed to kill worker");
    }
    let status = child.wait().await;
    tracing::info!(?pid, ?status, "worker killed");
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
