// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution helpers

use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Default time a worker gets to exit after a graceful kill before it is
/// killed forcibly.
pub const WORKER_KILL_GRACE: Duration = Duration::from_secs(2);

/// Errors from [`run_with_stdin`]
#[derive(Debug)]
pub enum StdinRunError {
    Io(std::io::Error),
    Timeout,
}

/// Run a command, feeding `input` on stdin, and collect its output.
///
/// With a timeout, the whole exchange (write, wait, collect) shares one
/// budget; without one, the call waits for the process to exit.
pub async fn run_with_stdin(
    mut cmd: Command,
    input: &str,
    timeout: Option<Duration>,
) -> Result<Output, StdinRunError> {
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    let mut child = cmd.spawn().map_err(StdinRunError::Io)?;

    let payload = input.as_bytes().to_vec();
    let stdin = child.stdin.take();
    let exchange = async move {
        if let Some(mut stdin) = stdin {
            // A process that exits without reading stdin is not an error here
            match stdin.write_all(&payload).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                Err(e) => return Err(e),
            }
            drop(stdin);
        }
        child.wait_with_output().await
    };

    let Some(timeout) = timeout else {
        return exchange.await.map_err(StdinRunError::Io);
    };
    match tokio::time::timeout(timeout, exchange).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(StdinRunError::Io(e)),
        Err(_elapsed) => Err(StdinRunError::Timeout),
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
