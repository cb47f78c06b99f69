// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project config discovery and engine working directory

use le_adapters::PathFinder;
use le_core::EngineConfig;
use std::io;
use std::path::{Path, PathBuf};

/// Config file names, in priority order within a directory
pub const CONFIG_FILES: &[&str] = &[
    ".eslintrc.js",
    ".eslintrc.yaml",
    ".eslintrc.yml",
    ".eslintrc.json",
    ".eslintrc",
];

const PACKAGE_MANIFEST: &str = "package.json";
const PACKAGE_CONFIG_KEY: &str = "eslintConfig";
const IGNORE_FILE: &str = ".eslintignore";

/// Finds project configuration by walking up from a file's directory
#[derive(Clone)]
pub struct ConfigLocator<F> {
    finder: F,
}

impl<F: PathFinder> ConfigLocator<F> {
    pub fn new(finder: F) -> Self {
        Self { finder }
    }

    /// Nearest engine config file, else the nearest `package.json` when it
    /// carries an `eslintConfig` entry.
    pub fn find_config(&self, file_dir: &Path) -> io::Result<Option<PathBuf>> {
        if let Some(path) = self.finder.find_nearest(file_dir, CONFIG_FILES)? {
            return Ok(Some(path));
        }
        match self.finder.find_nearest(file_dir, &[PACKAGE_MANIFEST])? {
            Some(manifest) if has_package_config(&manifest) => Ok(Some(manifest)),
            _ => Ok(None),
        }
    }

    /// Whether files in `file_dir` are skipped for lack of a project config.
    pub fn is_lint_disabled(
        &self,
        file_dir: &Path,
        disable_when_no_config: bool,
    ) -> io::Result<bool> {
        if !disable_when_no_config {
            return Ok(false);
        }
        Ok(self.find_config(file_dir)?.is_none())
    }

    /// Directory the engine runs in: the one holding the nearest ignore
    /// file, or the file's own directory.
    pub fn working_dir(&self, file_dir: &Path, config: &EngineConfig) -> io::Result<PathBuf> {
        if !config.disable_eslint_ignore {
            if let Some(ignore) = self.finder.find_nearest(file_dir, &[IGNORE_FILE])? {
                if let Some(dir) = ignore.parent() {
                    return Ok(dir.to_path_buf());
                }
            }
        }
        Ok(file_dir.to_path_buf())
    }
}

fn has_package_config(manifest: &Path) -> bool {
    let Ok(raw) = std::fs::read_to_string(manifest) else {
        return false;
    };
    match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(value) => value
            .get(PACKAGE_CONFIG_KEY)
            .is_some_and(|config| !config.is_null() && config != &serde_json::Value::Bool(false)),
        Err(e) => {
            tracing::debug!(path = %manifest.display(), error = %e, "unreadable package manifest");
            false
        }
    }
}

#[cfg(test)]
#[path = "config_locator_tests.rs"]
mod tests;
