// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Upward file discovery

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakePathFinder;

use std::path::{Path, PathBuf};

/// Locates the nearest entry named one of `names`, starting in `start` and
/// walking up through its ancestors. Earlier names win within a directory.
pub trait PathFinder: Clone + Send + Sync + 'static {
    fn find_nearest(&self, start: &Path, names: &[&str]) -> std::io::Result<Option<PathBuf>>;
}

/// Walks the real filesystem
#[derive(Clone, Copy, Debug, Default)]
pub struct FsPathFinder;

impl PathFinder for FsPathFinder {
    fn find_nearest(&self, start: &Path, names: &[&str]) -> std::io::Result<Option<PathBuf>> {
        for dir in start.ancestors() {
            for name in names {
                let candidate = dir.join(name);
                match candidate.try_exists() {
                    Ok(true) => return Ok(Some(candidate)),
                    Ok(false) => {}
                    // Unreadable intermediate directories are skipped, not fatal
                    Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {}
                    Err(e) => return Err(e),
                }
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
