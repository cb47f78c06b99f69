// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! le-worker
//!
//! Spawned by `le` with piped stdio. Not meant to be run by hand.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::path::Path;

use le_adapters::{
    FsEngineLoader, FsPathFinder, SystemCommandRunner, SystemEngineProcess, TracedEngineProcess,
};
use le_engine::{JobRunner, PathResolver};
use le_worker::{env, reporter, StartupError, STARTUP_MARKER_PREFIX};
use tracing::{error, info};

const LOG_FILE: &str = "worker.log";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("le-worker {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("le-worker {}", env!("CARGO_PKG_VERSION"));
                println!("Lint worker - runs lint and fix jobs on behalf of `le`");
                println!();
                println!("USAGE:");
                println!("    le-worker");
                println!();
                println!("The worker is started by the `le` CLI and should not be invoked");
                println!("directly. It reads jobs on stdin and writes results to stdout.");
                println!();
                println!("OPTIONS:");
                println!("    -h, --help       Print help information");
                println!("    -v, --version    Print version information");
                return Ok(());
            }
            _ => {
                eprintln!("error: unexpected argument '{arg}'");
                eprintln!("Usage: le-worker [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    let state_dir = env::state_dir()?;
    let log_path = state_dir.join(LOG_FILE);

    // Written before tracing starts so the host can find this run in the log
    write_startup_marker(&log_path)?;
    let _log_guard = setup_logging(&log_path)?;

    let reporter = match reporter::install(&state_dir) {
        Ok(path) => path,
        Err(e) => {
            let e = StartupError::from(e);
            write_startup_error(&log_path, &e);
            error!("failed to install reporter: {e}");
            return Err(e.into());
        }
    };
    info!(reporter = %reporter.display(), "starting worker");

    let finder = FsPathFinder;
    let resolver = PathResolver::new(finder, SystemCommandRunner, FsEngineLoader)
        .with_bundled(le_engine::env::bundled_engine_dir());
    let engine = TracedEngineProcess::new(SystemEngineProcess::default());
    let runner = JobRunner::new(resolver, finder, engine, reporter);

    if let Err(e) = le_worker::serve(&runner, tokio::io::stdin(), tokio::io::stdout()).await {
        error!("worker stopped: {e}");
        return Err(e.into());
    }
    info!("worker exiting");
    Ok(())
}

fn write_startup_marker(log_path: &Path) -> Result<(), StartupError> {
    use std::io::Write;

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;
    writeln!(file, "{}{})", STARTUP_MARKER_PREFIX, std::process::id())?;
    Ok(())
}

fn write_startup_error(log_path: &Path, error: &StartupError) {
    use std::io::Write;

    let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
    else {
        return;
    };
    let _ = writeln!(file, "ERROR Failed to start worker: {error}");
}

fn setup_logging(
    log_path: &Path,
) -> Result<tracing_appender::non_blocking::WorkerGuard, StartupError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let dir = log_path.parent().ok_or(StartupError::NoStateDir)?;
    let file = log_path.file_name().ok_or(StartupError::NoStateDir)?;
    let (non_blocking, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Stdout carries protocol frames; logs go to the file only
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .init();

    Ok(guard)
}
