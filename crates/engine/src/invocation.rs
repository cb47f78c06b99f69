// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine argument construction
//!
//! The argument vector mirrors a command line as the engine's CLI sees it:
//!
//! ```text
//! <entry> a-b-c --stdin --format <reporter> [--rulesdir <dir>] [--config <path>] [--no-ignore] --stdin-filename <file>
//! ```
//!
//! The second slot is a placeholder for the script path, which the engine
//! skips; the runner substitutes the resolved CLI script when executing.

use le_adapters::PathFinder;
use le_core::{EngineConfig, JobKind, RuleSuppressionSet};
use regex::{Captures, Regex};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Occupies the script slot of the argument vector
pub const PLACEHOLDER_ARG: &str = "a-b-c";

const STDIN_FILENAME: &str = "--stdin-filename";

// $NAME, ${NAME} or ${NAME:-default}
#[allow(clippy::expect_used)]
static ENV_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{(\w+)(?::-([^}]*))?\}|(\w+))").expect("constant regex pattern is valid")
});

/// Outcome of building an invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Args(Vec<String>),
    /// No project config and the configuration asks to skip such files
    Skip,
}

impl Invocation {
    pub fn args(&self) -> Option<&[String]> {
        match self {
            Invocation::Args(args) => Some(args),
            Invocation::Skip => None,
        }
    }

    /// Add job-kind flags ahead of the trailing `--stdin-filename <file>`.
    ///
    /// Fix jobs get `--fix-dry-run`; suppressed rules are switched off with a
    /// single `--rule` object.
    pub fn with_job(self, kind: JobKind, rules: Option<&RuleSuppressionSet>) -> Self {
        let Invocation::Args(mut args) = self else {
            return Invocation::Skip;
        };

        let mut extra = Vec::new();
        if kind == JobKind::Fix {
            extra.push("--fix-dry-run".to_string());
        }
        let off: serde_json::Map<String, serde_json::Value> = rules
            .into_iter()
            .flat_map(|rules| rules.iter())
            .filter(|(_, suppressed)| **suppressed)
            .map(|(rule, _)| (rule.clone(), serde_json::Value::from("off")))
            .collect();
        if !off.is_empty() {
            extra.push("--rule".to_string());
            extra.push(serde_json::Value::Object(off).to_string());
        }

        let at = trailing_filename_index(&args).unwrap_or(args.len());
        args.splice(at..at, extra);
        Invocation::Args(args)
    }
}

fn trailing_filename_index(args: &[String]) -> Option<usize> {
    let at = args.len().checked_sub(2)?;
    (args[at] == STDIN_FILENAME).then_some(at)
}

/// Builds engine argument vectors for files
#[derive(Clone)]
pub struct InvocationBuilder<F> {
    finder: F,
    reporter: PathBuf,
}

impl<F: PathFinder> InvocationBuilder<F> {
    /// `reporter` is the formatter script passed to `--format`
    pub fn new(finder: F, reporter: impl Into<PathBuf>) -> Self {
        Self {
            finder,
            reporter: reporter.into(),
        }
    }

    pub fn build(
        &self,
        config: &EngineConfig,
        file_path: &Path,
        file_dir: &Path,
        discovered_config: Option<&Path>,
    ) -> io::Result<Invocation> {
        if discovered_config.is_none() && config.disable_when_no_eslint_config {
            return Ok(Invocation::Skip);
        }

        let config_path = match config.eslintrc_path.as_deref().filter(|p| !p.is_empty()) {
            Some(path) => Some(expand_env(path, |name| std::env::var(name).ok())),
            None => discovered_config.map(|p| p.display().to_string()),
        };

        let mut args = vec![
            config.node_executable().to_string(),
            PLACEHOLDER_ARG.to_string(),
            "--stdin".to_string(),
            "--format".to_string(),
            self.reporter.display().to_string(),
        ];

        if let Some(rules_dir) = config.eslint_rules_dir.as_deref().filter(|d| !d.is_empty()) {
            if let Some(dir) = self.rules_dir(rules_dir, file_dir)? {
                args.push("--rulesdir".to_string());
                args.push(dir.display().to_string());
            }
        }
        if let Some(path) = config_path {
            args.push("--config".to_string());
            args.push(path);
        }
        if config.disable_eslint_ignore {
            args.push("--no-ignore".to_string());
        }
        args.push(STDIN_FILENAME.to_string());
        args.push(file_path.display().to_string());

        Ok(Invocation::Args(args))
    }

    /// Absolute rules dirs pass through; relative ones name the nearest
    /// match above the file.
    fn rules_dir(&self, configured: &str, file_dir: &Path) -> io::Result<Option<PathBuf>> {
        let expanded = PathBuf::from(expand_env(configured, |name| std::env::var(name).ok()));
        if expanded.is_absolute() {
            return Ok(Some(expanded));
        }
        let name = expanded.to_string_lossy();
        let found = self.finder.find_nearest(file_dir, &[name.as_ref()])?;
        if found.is_none() {
            tracing::warn!(rules_dir = %name, file_dir = %file_dir.display(), "rules directory not found");
        }
        Ok(found)
    }
}

/// Substitute `$NAME`, `${NAME}` and `${NAME:-default}` references. Unset
/// variables expand to their default, or to nothing; a `$` not followed by a
/// name is kept.
pub fn expand_env(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    ENV_PATTERN
        .replace_all(input, |caps: &Captures| {
            let name = caps.get(1).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
            lookup(name).unwrap_or_else(|| {
                caps.get(2)
                    .map(|default| default.as_str().to_string())
                    .unwrap_or_default()
            })
        })
        .into_owned()
}

#[cfg(test)]
#[path = "invocation_tests.rs"]
mod tests;
