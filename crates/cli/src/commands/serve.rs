// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `le serve`: newline-delimited JSON requests over stdin
//!
//! One request per line, one reply per request. Requests run concurrently
//! over the single worker, so replies may come back in any order; callers
//! match them by `id`.

use anyhow::Result;
use le_adapters::{PathFinder, WorkerAdapter};
use le_core::IdGen;
use le_engine::{Buffer, FixOutcome, Host, SAVE_BEFORE_FIXING};
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::task::JoinSet;

use crate::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Command {
    Lint,
    Fix,
    /// Re-read the settings file
    Reload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Request {
    #[serde(default)]
    id: Value,
    command: Command,
    #[serde(default)]
    file_path: Option<String>,
    /// Buffer text; read from disk when absent
    #[serde(default)]
    contents: Option<String>,
    #[serde(default)]
    modified: bool,
    #[serde(default)]
    on_save: bool,
}

pub async fn handle<W, F, G>(host: Arc<Host<W, F, G>>) -> Result<()>
where
    W: WorkerAdapter,
    F: PathFinder,
    G: IdGen,
{
    if let Err(e) = host.dispatcher().start().await {
        tracing::warn!("worker pre-warm failed: {e}");
    }
    let result = serve(
        Arc::clone(&host),
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await;
    host.shutdown();
    result
}

/// Answer requests from `input` until it closes and every reply is written.
pub(crate) async fn serve<W, F, G, R, O>(host: Arc<Host<W, F, G>>, input: R, mut output: O) -> Result<()>
where
    W: WorkerAdapter,
    F: PathFinder,
    G: IdGen,
    R: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut tasks = JoinSet::new();
    let mut open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if open => match line? {
                Some(line) if line.trim().is_empty() => {}
                Some(line) => {
                    let host = Arc::clone(&host);
                    tasks.spawn(async move { respond(&host, &line).await });
                }
                None => {
                    tracing::debug!(pending = tasks.len(), "input closed");
                    open = false;
                }
            },
            Some(joined) = tasks.join_next() => match joined {
                Ok(reply) => {
                    let mut line = serde_json::to_vec(&reply)?;
                    line.push(b'\n');
                    output.write_all(&line).await?;
                    output.flush().await?;
                }
                Err(e) => tracing::error!("request task failed: {e}"),
            },
            else => break,
        }
    }
    Ok(())
}

async fn respond<W, F, G>(host: &Host<W, F, G>, line: &str) -> Value
where
    W: WorkerAdapter,
    F: PathFinder,
    G: IdGen,
{
    let request: Request = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => return failure(&Value::Null, format!("invalid request: {e}")),
    };
    let id = request.id.clone();
    match execute(host, request).await {
        Ok(reply) => with_id(&id, reply),
        Err(e) => failure(&id, format!("{e:#}")),
    }
}

async fn execute<W, F, G>(host: &Host<W, F, G>, request: Request) -> Result<Value>
where
    W: WorkerAdapter,
    F: PathFinder,
    G: IdGen,
{
    match request.command {
        Command::Reload => {
            let changed = host.settings().reload()?;
            Ok(json!({ "changed": changed }))
        }
        Command::Lint => {
            let buffer = buffer(request).await?;
            let outcome = host.lint(&buffer).await?;
            Ok(output::lint_json(&buffer.path, &outcome))
        }
        Command::Fix => {
            let on_save = request.on_save;
            let buffer = buffer(request).await?;
            match super::fix::run(host, &buffer, on_save).await? {
                Some(FixOutcome::Modified) => Err(anyhow::anyhow!(SAVE_BEFORE_FIXING)),
                Some(outcome) => Ok(super::fix::fix_json(&buffer.path, &outcome)),
                None => Ok(json!({ "filePath": buffer.path, "status": "skipped" })),
            }
        }
    }
}

async fn buffer(request: Request) -> Result<Buffer> {
    let Some(path) = request.file_path else {
        anyhow::bail!("missing filePath");
    };
    match request.contents {
        Some(contents) => Ok(Buffer {
            path: super::absolute(Path::new(&path))?.display().to_string(),
            contents,
            modified: request.modified,
        }),
        None => super::read_buffer(Path::new(&path), request.modified).await,
    }
}

fn with_id(id: &Value, reply: Value) -> Value {
    let mut object = json!({ "id": id, "ok": true });
    if let (Some(target), Value::Object(fields)) = (object.as_object_mut(), reply) {
        target.extend(fields);
    }
    object
}

fn failure(id: &Value, error: String) -> Value {
    json!({ "id": id, "ok": false, "error": error })
}

#[cfg(test)]
#[path = "serve_tests.rs"]
mod tests;
