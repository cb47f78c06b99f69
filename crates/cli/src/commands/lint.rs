// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `le lint`

use anyhow::{Context, Result};
use clap::Args;
use le_adapters::{PathFinder, WorkerAdapter};
use le_core::IdGen;
use le_engine::{Buffer, Host, LintOutcome, REMOTE_FILE_WARNING};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

use crate::color::Palette;
use crate::exit_error::ExitError;
use crate::output::{self, OutputFormat, Tally};

#[derive(Args)]
pub struct LintArgs {
    /// Files to lint
    #[arg(required_unless_present = "stdin")]
    pub files: Vec<PathBuf>,

    /// Lint as if the buffers had unsaved changes
    #[arg(long)]
    pub modified: bool,

    /// Read the buffer from stdin
    #[arg(long, requires = "stdin_filename", conflicts_with = "files")]
    pub stdin: bool,

    /// Path of the buffer read from stdin
    #[arg(long, value_name = "FILE")]
    pub stdin_filename: Option<PathBuf>,
}

pub async fn handle<W, F, G>(args: LintArgs, host: &Host<W, F, G>, format: OutputFormat) -> Result<()>
where
    W: WorkerAdapter,
    F: PathFinder,
    G: IdGen,
{
    let buffers = buffers(args).await?;
    let results = lint_all(host, &buffers).await?;

    let tally = match format {
        OutputFormat::Text => {
            let show_rule = host.settings().current().show_rule;
            let (text, tally) = render_text(&results, show_rule, Palette::detect());
            print!("{text}");
            for (path, outcome) in &results {
                if *outcome == LintOutcome::Remote {
                    eprintln!("warning: {path}: {REMOTE_FILE_WARNING}");
                }
            }
            tally
        }
        OutputFormat::Json => {
            let records: Vec<_> = results
                .iter()
                .map(|(path, outcome)| output::lint_json(path, outcome))
                .collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
            tally(&results)
        }
    };

    if tally.errors > 0 {
        return Err(ExitError::silent(1).into());
    }
    Ok(())
}

async fn buffers(args: LintArgs) -> Result<Vec<Buffer>> {
    if let (true, Some(name)) = (args.stdin, &args.stdin_filename) {
        let mut contents = String::new();
        tokio::io::stdin()
            .read_to_string(&mut contents)
            .await
            .context("failed to read stdin")?;
        return Ok(vec![Buffer {
            path: super::absolute(name)?.display().to_string(),
            contents,
            modified: args.modified,
        }]);
    }

    let mut buffers = Vec::with_capacity(args.files.len());
    for file in &args.files {
        buffers.push(super::read_buffer(file, args.modified).await?);
    }
    Ok(buffers)
}

/// Lint each buffer in turn over the shared worker.
pub(crate) async fn lint_all<W, F, G>(
    host: &Host<W, F, G>,
    buffers: &[Buffer],
) -> Result<Vec<(String, LintOutcome)>>
where
    W: WorkerAdapter,
    F: PathFinder,
    G: IdGen,
{
    let mut results = Vec::with_capacity(buffers.len());
    for buffer in buffers {
        let outcome = host
            .lint(buffer)
            .await
            .with_context(|| format!("failed to lint {}", buffer.path))?;
        results.push((buffer.path.clone(), outcome));
    }
    Ok(results)
}

fn tally(results: &[(String, LintOutcome)]) -> Tally {
    let mut tally = Tally::default();
    for (_, outcome) in results {
        if let LintOutcome::Diagnostics(diagnostics) = outcome {
            tally.add(diagnostics);
        }
    }
    tally
}

pub(crate) fn render_text(
    results: &[(String, LintOutcome)],
    show_rule: bool,
    palette: Palette,
) -> (String, Tally) {
    let mut text = String::new();
    for (path, outcome) in results {
        if let LintOutcome::Diagnostics(diagnostics) = outcome {
            let block = output::render_diagnostics(path, diagnostics, show_rule, palette);
            if !block.is_empty() {
                text.push_str(&block);
                text.push('\n');
            }
        }
    }
    let tally = tally(results);
    if let Some(line) = output::render_tally(tally) {
        text.push_str(&line);
        text.push('\n');
    }
    (text, tally)
}

#[cfg(test)]
#[path = "lint_tests.rs"]
mod tests;
