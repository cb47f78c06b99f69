// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory path finder for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::PathFinder;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

struct FakeFinderState {
    paths: HashSet<PathBuf>,
    walks: Vec<(PathBuf, Vec<String>)>,
    fail: bool,
}

/// Path finder over a fixed set of existing paths. Every walk is recorded.
#[derive(Clone)]
pub struct FakePathFinder {
    inner: Arc<Mutex<FakeFinderState>>,
}

impl Default for FakePathFinder {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeFinderState {
                paths: HashSet::new(),
                walks: Vec::new(),
                fail: false,
            })),
        }
    }
}

impl FakePathFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `path` as existing
    pub fn add(&self, path: impl Into<PathBuf>) -> &Self {
        self.inner.lock().paths.insert(path.into());
        self
    }

    /// Make every walk fail with an I/O error
    pub fn set_failing(&self, fail: bool) {
        self.inner.lock().fail = fail;
    }

    /// Number of walks performed
    pub fn walk_count(&self) -> usize {
        self.inner.lock().walks.len()
    }

    /// Walks performed for any of `name`
    pub fn walks_for(&self, name: &str) -> usize {
        self.inner
            .lock()
            .walks
            .iter()
            .filter(|(_, names)| names.iter().any(|n| n == name))
            .count()
    }
}

impl PathFinder for FakePathFinder {
    fn find_nearest(&self, start: &Path, names: &[&str]) -> std::io::Result<Option<PathBuf>> {
        let mut inner = self.inner.lock();
        inner.walks.push((
            start.to_path_buf(),
            names.iter().map(|n| n.to_string()).collect(),
        ));
        if inner.fail {
            return Err(std::io::Error::other("walk failed"));
        }
        for dir in start.ancestors() {
            for name in names {
                let candidate = dir.join(name);
                if inner.paths.contains(&candidate) {
                    return Ok(Some(candidate));
                }
            }
        }
        Ok(None)
    }
}
