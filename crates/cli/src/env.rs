// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;

// --- Settings ---

/// Settings file override, below `--config`
pub fn config_path() -> Option<PathBuf> {
    std::env::var("LE_CONFIG")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

// --- Logging ---

/// Filter directives for stderr logging
pub fn log_filter() -> Option<String> {
    std::env::var("LE_LOG").ok().filter(|s| !s.is_empty())
}

// --- Color ---

pub fn no_color() -> bool {
    std::env::var("NO_COLOR").is_ok_and(|v| v == "1")
}

pub fn force_color() -> bool {
    std::env::var("COLOR").is_ok_and(|v| v == "1")
}

// --- Worker binary ---

pub fn worker_binary() -> Option<String> {
    std::env::var("LE_WORKER_BINARY").ok().filter(|s| !s.is_empty())
}

pub fn cargo_manifest_dir() -> Option<String> {
    std::env::var("CARGO_MANIFEST_DIR").ok()
}
