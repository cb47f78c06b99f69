// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job execution inside the worker
//!
//! One job runs as: config discovery → skip check → engine resolution →
//! argument construction → engine process → report parsing.

use crate::config_locator::ConfigLocator;
use crate::invocation::{Invocation, InvocationBuilder};
use crate::resolver::PathResolver;
use le_adapters::{CommandRunner, EngineCommand, EngineLoader, EngineProcess, PathFinder};
use le_core::{
    Diagnostic, FailureKind, JobFailure, JobKind, JobMessages, JobResponse, JobSpec, RulesDiff,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Text returned for a completed fix job
pub const FIX_COMPLETE: &str = "Linter-ESLint: Fix complete.";

/// Text returned for a fix job on a file without a project config
pub const FIX_SKIPPED: &str = "Linter-ESLint: No ESLint configuration found, nothing fixed.";

/// What the reporter prints for the first linted file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EngineReport {
    messages: Vec<Diagnostic>,
    /// Fixed source, present only when fixes were applied
    output: Option<String>,
    /// Loaded rules that can fix their own violations
    fixable: Vec<String>,
}

/// Executes jobs against the engine installation resolved for each file
pub struct JobRunner<F, C, L, E> {
    resolver: PathResolver<F, C, L>,
    locator: ConfigLocator<F>,
    builder: InvocationBuilder<F>,
    engine: E,
}

impl<F, C, L, E> JobRunner<F, C, L, E>
where
    F: PathFinder,
    C: CommandRunner,
    L: EngineLoader,
    E: EngineProcess,
{
    pub fn new(
        resolver: PathResolver<F, C, L>,
        finder: F,
        engine: E,
        reporter: impl Into<PathBuf>,
    ) -> Self {
        Self {
            resolver,
            locator: ConfigLocator::new(finder.clone()),
            builder: InvocationBuilder::new(finder, reporter),
            engine,
        }
    }

    pub fn resolver(&self) -> &PathResolver<F, C, L> {
        &self.resolver
    }

    pub async fn run(&self, job: &JobSpec) -> Result<JobResponse, JobFailure> {
        let file_dir = job.file_dir();
        let discovered = self.locator.find_config(file_dir).map_err(resolution)?;
        let invocation = self
            .builder
            .build(&job.config, &job.file_path, file_dir, discovered.as_deref())
            .map_err(resolution)?;
        if invocation == Invocation::Skip {
            tracing::debug!(file = %job.file_path.display(), "no project config, skipping");
            return Ok(match job.kind {
                JobKind::Lint => JobResponse::empty(),
                JobKind::Fix => JobResponse::text(FIX_SKIPPED, RulesDiff::new()),
            });
        }

        let resolved = self.resolver.resolve(file_dir, &job.config)?;
        let cwd = self
            .locator
            .working_dir(file_dir, &job.config)
            .map_err(resolution)?;
        let invocation = invocation.with_job(job.kind, job.rules.as_ref());
        let command = engine_command(
            invocation.args().unwrap_or_default(),
            &resolved.handle.entry_script,
            cwd,
            self.resolver.active_modules_path().as_deref(),
        )?;

        let output = self
            .engine
            .execute(&command, &job.contents)
            .await
            .map_err(|e| engine_failure(e.to_string()))?;

        if !matches!(output.status, Some(0) | Some(1)) {
            let stderr = output.stderr.trim();
            return Err(engine_failure(if stderr.is_empty() {
                format!("engine exited with status {:?}", output.status)
            } else {
                stderr.to_string()
            }));
        }
        let report: EngineReport = serde_json::from_str(output.stdout.trim())
            .map_err(|e| engine_failure(format!("unreadable engine report: {e}")))?;
        let rules_diff = rules_diff(&report);

        match job.kind {
            JobKind::Lint => Ok(JobResponse {
                messages: JobMessages::Diagnostics(report.messages),
                rules_diff,
            }),
            JobKind::Fix => {
                if let Some(fixed) = report.output.filter(|fixed| fixed != &job.contents) {
                    tokio::fs::write(&job.file_path, fixed).await.map_err(|e| {
                        engine_failure(format!(
                            "failed to write {}: {e}",
                            job.file_path.display()
                        ))
                    })?;
                    tracing::info!(file = %job.file_path.display(), "fixes written");
                }
                Ok(JobResponse::text(FIX_COMPLETE, rules_diff))
            }
        }
    }
}

/// Replace the placeholder slot with the engine's CLI script.
fn engine_command(
    args: &[String],
    entry_script: &Path,
    cwd: PathBuf,
    modules_path: Option<&Path>,
) -> Result<EngineCommand, JobFailure> {
    let [program, _placeholder, rest @ ..] = args else {
        return Err(engine_failure(format!("incomplete invocation: {args:?}")));
    };
    let mut engine_args = Vec::with_capacity(rest.len() + 1);
    engine_args.push(entry_script.display().to_string());
    engine_args.extend(rest.iter().cloned());

    let env = vec![(
        "NODE_PATH".to_string(),
        modules_path
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
    )];
    Ok(EngineCommand {
        program: program.clone(),
        args: engine_args,
        cwd,
        env,
    })
}

/// Fixable rules become `true`; rules that reported without being fixable
/// become `false`.
fn rules_diff(report: &EngineReport) -> RulesDiff {
    let mut diff: RulesDiff = report
        .fixable
        .iter()
        .map(|rule| (rule.clone(), true))
        .collect();
    for rule in report.messages.iter().filter_map(|m| m.rule_id.as_ref()) {
        diff.entry(rule.clone()).or_insert(false);
    }
    diff
}

fn resolution(err: std::io::Error) -> JobFailure {
    JobFailure {
        kind: FailureKind::Resolution,
        message: err.to_string(),
    }
}

fn engine_failure(message: String) -> JobFailure {
    JobFailure {
        kind: FailureKind::Engine,
        message,
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
