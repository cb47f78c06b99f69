// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `le debug`: how a file would be linted

use anyhow::Result;
use clap::Args;
use le_adapters::{
    CommandRunner, EngineLoader, FsEngineLoader, FsPathFinder, PathFinder, SystemCommandRunner,
};
use le_core::Settings;
use le_engine::{ConfigLocator, PathResolver};
use serde::Serialize;
use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

#[derive(Args)]
pub struct DebugArgs {
    /// File whose setup to report
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugReport {
    pub version: String,
    pub worker_binary: String,
    pub file_path: String,
    pub engine_path: Option<String>,
    pub engine_source: Option<String>,
    pub engine_version: Option<String>,
    pub engine_error: Option<String>,
    pub global_prefix: Option<String>,
    pub global_prefix_error: Option<String>,
    pub config_path: Option<String>,
    pub lint_disabled: bool,
    pub settings: Settings,
}

pub fn handle(args: DebugArgs, settings: Settings, format: OutputFormat) -> Result<()> {
    let file = super::absolute(&args.file)?;
    let resolver = PathResolver::new(FsPathFinder, SystemCommandRunner, FsEngineLoader)
        .with_bundled(le_engine::env::bundled_engine_dir());
    let locator = ConfigLocator::new(FsPathFinder);
    let worker = crate::worker_process::find_worker_binary();

    let report = collect(&resolver, &locator, &file, &worker, settings);
    match format {
        OutputFormat::Text => print!("{}", render(&report)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

pub(crate) fn collect<F, C, L>(
    resolver: &PathResolver<F, C, L>,
    locator: &ConfigLocator<F>,
    file: &Path,
    worker_binary: &Path,
    settings: Settings,
) -> DebugReport
where
    F: PathFinder,
    C: CommandRunner,
    L: EngineLoader,
{
    let file_dir = file.parent().unwrap_or_else(|| Path::new("/"));
    let mut report = DebugReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        worker_binary: worker_binary.display().to_string(),
        file_path: file.display().to_string(),
        engine_path: None,
        engine_source: None,
        engine_version: None,
        engine_error: None,
        global_prefix: None,
        global_prefix_error: None,
        config_path: None,
        lint_disabled: false,
        settings: Settings::default(),
    };

    match resolver.resolve(file_dir, &settings.engine) {
        Ok(engine) => {
            report.engine_path = Some(engine.handle.dir.display().to_string());
            report.engine_source = Some(engine.source.to_string());
            report.engine_version = engine.handle.version;
        }
        Err(e) => report.engine_error = Some(e.to_string()),
    }
    match resolver.global_prefix() {
        Ok(prefix) => report.global_prefix = Some(prefix),
        Err(e) => report.global_prefix_error = Some(e.to_string()),
    }
    match locator.find_config(file_dir) {
        Ok(config) => report.config_path = config.map(|p| p.display().to_string()),
        Err(e) => tracing::warn!(error = %e, "config lookup failed"),
    }
    report.lint_disabled =
        report.config_path.is_none() && settings.engine.disable_when_no_eslint_config;
    report.settings = settings;
    report
}

pub(crate) fn render(report: &DebugReport) -> Result<String> {
    let mut buf = String::new();
    let none = "(none)";
    writeln!(buf, "le version:     {}", report.version)?;
    writeln!(buf, "worker binary:  {}", report.worker_binary)?;
    writeln!(buf, "file:           {}", report.file_path)?;
    match (&report.engine_path, &report.engine_error) {
        (Some(path), _) => writeln!(
            buf,
            "engine:         {path} ({}, {})",
            report.engine_source.as_deref().unwrap_or("unknown"),
            report.engine_version.as_deref().unwrap_or("unknown version"),
        )?,
        (None, Some(error)) => writeln!(buf, "engine:         not found: {error}")?,
        (None, None) => writeln!(buf, "engine:         {none}")?,
    }
    match (&report.global_prefix, &report.global_prefix_error) {
        (Some(prefix), _) => writeln!(buf, "global prefix:  {prefix}")?,
        (None, Some(error)) => writeln!(buf, "global prefix:  unavailable: {error}")?,
        (None, None) => writeln!(buf, "global prefix:  {none}")?,
    }
    writeln!(
        buf,
        "config:         {}",
        report.config_path.as_deref().unwrap_or(none)
    )?;
    writeln!(buf, "lint disabled:  {}", report.lint_disabled)?;
    writeln!(buf)?;
    writeln!(buf, "settings:")?;
    for line in toml::to_string_pretty(&report.settings)?.lines() {
        writeln!(buf, "  {line}")?;
    }
    Ok(buf)
}

#[cfg(test)]
#[path = "debug_tests.rs"]
mod tests;
