// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job requests and responses exchanged with the worker.

use crate::config::EngineConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Correlation identifier for one dispatched job.
///
/// Generated by the host per `send_job` call and echoed back by the
/// worker so a response reaches exactly the caller that submitted it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rule id → suppressed. Sent with a job; the worker turns the suppressed
/// entries into `--rule '{"id":"off"}'`.
pub type RuleSuppressionSet = BTreeMap<String, bool>;

/// Rule id → auto-fixable, as reported by the engine for a job.
pub type RulesDiff = BTreeMap<String, bool>;

/// What the worker should do with the contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    Lint,
    Fix,
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobKind::Lint => write!(f, "lint"),
            JobKind::Fix => write!(f, "fix"),
        }
    }
}

/// A single lint or fix request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSpec {
    #[serde(rename = "type")]
    pub kind: JobKind,
    pub contents: String,
    pub config: EngineConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<RuleSuppressionSet>,
    pub file_path: PathBuf,
    #[serde(default)]
    pub project_path: String,
}

impl JobSpec {
    /// Directory the engine is resolved from.
    pub fn file_dir(&self) -> &Path {
        self.file_path.parent().unwrap_or_else(|| Path::new("/"))
    }

    /// Rules switched off for this job, in stable order.
    pub fn suppressed_rules(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .flat_map(|rules| rules.iter())
            .filter(|(_, suppressed)| **suppressed)
            .map(|(id, _)| id.as_str())
    }
}

/// An automatic fix attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    pub range: [usize; 2],
    pub text: String,
}

/// One message reported by the engine for a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    #[serde(default)]
    pub rule_id: Option<String>,
    /// 1 = warning, 2 = error
    pub severity: u8,
    pub message: String,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fatal: bool,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.severity >= 2
    }
}

/// Diagnostics for a lint job, a status line for a fix job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobMessages {
    Diagnostics(Vec<Diagnostic>),
    Text(String),
}

impl JobMessages {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            JobMessages::Diagnostics(d) => d,
            JobMessages::Text(_) => &[],
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            JobMessages::Text(t) => Some(t),
            JobMessages::Diagnostics(_) => None,
        }
    }
}

/// Result of a completed job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub messages: JobMessages,
    #[serde(default)]
    pub rules_diff: RulesDiff,
}

impl JobResponse {
    /// Nothing to report (skipped file or clean lint).
    pub fn empty() -> Self {
        Self {
            messages: JobMessages::Diagnostics(Vec::new()),
            rules_diff: RulesDiff::new(),
        }
    }

    pub fn text(message: impl Into<String>, rules_diff: RulesDiff) -> Self {
        Self {
            messages: JobMessages::Text(message.into()),
            rules_diff,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
