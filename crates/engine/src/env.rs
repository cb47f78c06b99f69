// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.

use std::path::PathBuf;
use std::time::Duration;

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Time a spawned worker has to send its `Ready` handshake (default: 10s).
pub fn worker_ready_timeout() -> Duration {
    parse_duration_ms("LE_WORKER_READY_MS").unwrap_or(Duration::from_secs(10))
}

/// Engine package used when a project's own copy cannot be loaded.
///
/// `LE_BUNDLED_ESLINT` wins; otherwise `node_modules/eslint` next to the
/// running executable.
pub fn bundled_engine_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("LE_BUNDLED_ESLINT").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join("node_modules").join("eslint"))
}
