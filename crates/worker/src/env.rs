// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the worker crate.

use crate::StartupError;
use std::path::PathBuf;

/// Resolve state directory: LE_STATE_DIR > XDG_STATE_HOME/le > ~/.local/state/le
pub fn state_dir() -> Result<PathBuf, StartupError> {
    if let Ok(dir) = std::env::var("LE_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("le"));
    }
    let home = std::env::var("HOME").map_err(|_| StartupError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/le"))
}
