// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem engine loader

use super::{EngineHandle, EngineLoader, LoadError};
use serde::Deserialize;
use std::path::Path;

/// Library module whose presence marks a usable installation
const CLI_MODULE: &str = "lib/cli.js";

/// Executable script that drives the CLI module from `process.argv`
const BIN_SCRIPT: &str = "bin/eslint.js";

#[derive(Deserialize)]
struct PackageManifest {
    version: Option<String>,
}

/// Loads an engine by checking its package layout on disk
#[derive(Clone, Copy, Debug, Default)]
pub struct FsEngineLoader;

impl EngineLoader for FsEngineLoader {
    fn load(&self, dir: &Path) -> Result<EngineHandle, LoadError> {
        for required in [CLI_MODULE, BIN_SCRIPT] {
            let path = dir.join(required);
            match std::fs::metadata(&path) {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => return Err(LoadError::NotFound(path)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(LoadError::NotFound(path));
                }
                Err(source) => return Err(LoadError::Io { path, source }),
            }
        }

        let version = std::fs::read_to_string(dir.join("package.json"))
            .ok()
            .and_then(|raw| serde_json::from_str::<PackageManifest>(&raw).ok())
            .and_then(|manifest| manifest.version);

        Ok(EngineHandle {
            dir: dir.to_path_buf(),
            entry_script: dir.join(BIN_SCRIPT),
            version,
        })
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
