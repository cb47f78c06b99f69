// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `le fix`

use anyhow::{Context, Result};
use clap::Args;
use le_adapters::{PathFinder, WorkerAdapter};
use le_core::IdGen;
use le_engine::{Buffer, FixOutcome, Host, SAVE_BEFORE_FIXING};
use serde_json::{json, Value};
use std::path::PathBuf;

use crate::exit_error::ExitError;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct FixArgs {
    /// File to fix in place
    pub file: PathBuf,

    /// The buffer has unsaved changes
    #[arg(long)]
    pub modified: bool,

    /// Triggered by a save; only runs when fix-on-save is enabled
    #[arg(long)]
    pub on_save: bool,
}

pub async fn handle<W, F, G>(args: FixArgs, host: &Host<W, F, G>, format: OutputFormat) -> Result<()>
where
    W: WorkerAdapter,
    F: PathFinder,
    G: IdGen,
{
    let buffer = super::read_buffer(&args.file, args.modified).await?;
    let Some(outcome) = run(host, &buffer, args.on_save).await? else {
        tracing::debug!("fix on save disabled");
        return Ok(());
    };

    match format {
        OutputFormat::Text => {
            if let FixOutcome::Fixed {
                message,
                notify: true,
            } = &outcome
            {
                println!("{message}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&fix_json(&buffer.path, &outcome))?);
        }
    }

    if outcome == FixOutcome::Modified {
        return Err(ExitError::new(1, SAVE_BEFORE_FIXING).into());
    }
    Ok(())
}

/// Run the fix flow; `None` when a save-triggered fix is switched off.
pub(crate) async fn run<W, F, G>(
    host: &Host<W, F, G>,
    buffer: &Buffer,
    on_save: bool,
) -> Result<Option<FixOutcome>>
where
    W: WorkerAdapter,
    F: PathFinder,
    G: IdGen,
{
    let outcome = if on_save {
        host.saved(buffer).await
    } else {
        host.fix(buffer, false).await.map(Some)
    };
    outcome.with_context(|| format!("failed to fix {}", buffer.path))
}

pub(crate) fn fix_json(path: &str, outcome: &FixOutcome) -> Value {
    match outcome {
        FixOutcome::Fixed { message, .. } => json!({
            "filePath": path,
            "status": "fixed",
            "message": message,
        }),
        FixOutcome::Modified => json!({
            "filePath": path,
            "status": "modified",
            "message": SAVE_BEFORE_FIXING,
        }),
        FixOutcome::Empty => json!({ "filePath": path, "status": "empty" }),
        FixOutcome::Disabled => json!({ "filePath": path, "status": "disabled" }),
    }
}

#[cfg(test)]
#[path = "fix_tests.rs"]
mod tests;
