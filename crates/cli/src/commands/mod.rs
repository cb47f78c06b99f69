// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod debug;
pub mod fix;
pub mod lint;
pub mod serve;

use anyhow::{Context, Result};
use le_engine::Buffer;
use std::path::{Path, PathBuf};

/// Absolute form of a command-line path (remote URLs pass through)
pub(crate) fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() || path.to_string_lossy().contains("://") {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Ok(cwd.join(path))
}

/// Buffer for a file on disk; remote paths are not read.
pub(crate) async fn read_buffer(path: &Path, modified: bool) -> Result<Buffer> {
    let path = absolute(path)?.display().to_string();
    let contents = if path.contains("://") {
        String::new()
    } else {
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read {path}"))?
    };
    Ok(Buffer {
        path,
        contents,
        modified,
    })
}
