// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine formatter shipped inside the worker binary

use std::path::{Path, PathBuf};

/// Formatter source, printed as `{ messages, output, fixable }`
pub const REPORTER_JS: &str = include_str!("reporter.js");

const REPORTER_FILE: &str = "reporter.js";

/// Write the formatter into `dir`, leaving an identical copy untouched.
pub fn install(dir: &Path) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(REPORTER_FILE);
    match std::fs::read_to_string(&path) {
        Ok(existing) if existing == REPORTER_JS => return Ok(path),
        Ok(_) => tracing::info!(path = %path.display(), "updating reporter"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    std::fs::write(&path, REPORTER_JS)?;
    Ok(path)
}

#[cfg(test)]
#[path = "reporter_tests.rs"]
mod tests;
