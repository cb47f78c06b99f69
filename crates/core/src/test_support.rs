// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{
    Diagnostic, EngineConfig, JobKind, JobMessages, JobResponse, JobSpec, RulesDiff,
};
use std::path::PathBuf;

// ── Job factories ───────────────────────────────────────────────────────────

pub fn lint_job(file_path: &str, contents: &str) -> JobSpec {
    JobSpec {
        kind: JobKind::Lint,
        contents: contents.to_string(),
        config: EngineConfig::default(),
        rules: None,
        file_path: PathBuf::from(file_path),
        project_path: String::new(),
    }
}

pub fn fix_job(file_path: &str, contents: &str) -> JobSpec {
    JobSpec {
        kind: JobKind::Fix,
        ..lint_job(file_path, contents)
    }
}

// ── Response factories ──────────────────────────────────────────────────────

pub fn diagnostic(rule_id: &str, severity: u8, line: u32) -> Diagnostic {
    Diagnostic {
        rule_id: Some(rule_id.to_string()),
        severity,
        message: format!("{rule_id} violated"),
        line,
        column: 1,
        end_line: None,
        end_column: None,
        fix: None,
        fatal: false,
    }
}

pub fn lint_response(diagnostics: Vec<Diagnostic>, rules_diff: &[(&str, bool)]) -> JobResponse {
    JobResponse {
        messages: JobMessages::Diagnostics(diagnostics),
        rules_diff: rules_diff
            .iter()
            .map(|(rule, fixable)| (rule.to_string(), *fixable))
            .collect::<RulesDiff>(),
    }
}
