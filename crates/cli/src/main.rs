// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! le - lint and fix JavaScript through a persistent ESLint worker

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod color;
mod commands;
mod env;
mod exit_error;
mod output;
mod worker_process;

use output::OutputFormat;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use commands::{debug, fix, lint, serve};
use le_core::SettingsStore;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "le",
    version,
    about = "Lint and fix JavaScript through a persistent ESLint worker"
)]
struct Cli {
    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    /// Settings file (default: $LE_CONFIG or ~/.config/le/config.toml)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint files and print their diagnostics
    Lint(lint::LintArgs),
    /// Apply automatic fixes to a file
    Fix(fix::FixArgs),
    /// Show how a file would be linted
    Debug(debug::DebugArgs),
    /// Answer newline-delimited JSON requests on stdin
    Serve,
}

pub(crate) fn cli_command() -> clap::Command {
    Cli::command()
}

#[tokio::main]
async fn main() {
    setup_logging();
    if let Err(e) = run().await {
        let code = e
            .downcast_ref::<exit_error::ExitError>()
            .map_or(1, |c| c.code);
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(code);
    }
}

/// Log to stderr; stdout carries command output.
fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = env::log_filter()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, the
/// "Caused by" chain is skipped. Otherwise the full chain is rendered.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

/// Settings file: `--config` > `LE_CONFIG` > the per-user default
fn settings_path(flag: Option<PathBuf>) -> Option<PathBuf> {
    flag.or_else(env::config_path)
        .or_else(le_core::default_settings_path)
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;

    let Some(command) = cli.command else {
        cli_command().print_help()?;
        println!();
        return Ok(());
    };

    let settings = SettingsStore::open(settings_path(cli.config))?;

    match command {
        // Inspects the filesystem only; never starts a worker
        Commands::Debug(args) => debug::handle(args, settings.current(), format),
        Commands::Serve => serve::handle(Arc::new(worker_process::host(settings))).await,
        Commands::Lint(args) => {
            let host = worker_process::host(settings);
            let result = lint::handle(args, &host, format).await;
            host.shutdown();
            result
        }
        Commands::Fix(args) => {
            let host = worker_process::host(settings);
            let result = fix::handle(args, &host, format).await;
            host.shutdown();
            result
        }
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
