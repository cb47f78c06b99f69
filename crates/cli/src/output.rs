// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::color::Palette;
use clap::ValueEnum;
use le_core::Diagnostic;
use le_engine::{LintOutcome, REMOTE_FILE_WARNING};
use serde_json::{json, Value};
use std::fmt::Write;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Error and warning totals across files
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub errors: usize,
    pub warnings: usize,
}

impl Tally {
    pub fn add(&mut self, diagnostics: &[Diagnostic]) {
        let errors = diagnostics.iter().filter(|d| d.is_error()).count();
        self.errors += errors;
        self.warnings += diagnostics.len() - errors;
    }

    pub fn problems(&self) -> usize {
        self.errors + self.warnings
    }
}

/// Render one file's diagnostics as text; empty when there is nothing to show.
pub fn render_diagnostics(
    path: &str,
    diagnostics: &[Diagnostic],
    show_rule: bool,
    palette: Palette,
) -> String {
    if diagnostics.is_empty() {
        return String::new();
    }
    let mut buf = String::new();
    let _ = writeln!(buf, "{}", palette.header(path));
    for d in diagnostics {
        let position = format!("{}:{}", d.line, d.column);
        let label = if d.is_error() { "error" } else { "warning" };
        let _ = write!(
            buf,
            "  {}  {}  {}",
            palette.muted(&format!("{position:>7}")),
            palette.severity(d.severity, &format!("{label:<7}")),
            d.message
        );
        if let Some(rule) = d.rule_id.as_deref().filter(|_| show_rule) {
            let _ = write!(buf, "  {}", palette.muted(rule));
        }
        buf.push('\n');
    }
    buf
}

/// Closing line, e.g. `✖ 3 problems (2 errors, 1 warning)`
pub fn render_tally(tally: Tally) -> Option<String> {
    if tally.problems() == 0 {
        return None;
    }
    Some(format!(
        "✖ {} {} ({} {}, {} {})",
        tally.problems(),
        plural(tally.problems(), "problem"),
        tally.errors,
        plural(tally.errors, "error"),
        tally.warnings,
        plural(tally.warnings, "warning"),
    ))
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// JSON record for one linted file
pub fn lint_json(path: &str, outcome: &LintOutcome) -> Value {
    match outcome {
        LintOutcome::Diagnostics(diagnostics) => json!({
            "filePath": path,
            "messages": diagnostics,
        }),
        LintOutcome::Remote => json!({
            "filePath": path,
            "messages": [],
            "warning": REMOTE_FILE_WARNING,
        }),
    }
}
