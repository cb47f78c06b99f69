// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Locating and wiring the `le-worker` process

use std::path::PathBuf;

use le_adapters::{FsPathFinder, ProcessWorkerAdapter, TracedWorkerAdapter};
use le_core::{SettingsStore, UuidIdGen};
use le_engine::{Host, JobDispatcher};

const WORKER_BINARY: &str = "le-worker";

/// Host wired to a real worker process
pub type CliHost = Host<TracedWorkerAdapter<ProcessWorkerAdapter>, FsPathFinder, UuidIdGen>;

/// Build a host whose worker starts on the first job (or on `start`).
pub fn host(settings: SettingsStore) -> CliHost {
    let adapter = TracedWorkerAdapter::new(ProcessWorkerAdapter::new(find_worker_binary()));
    let dispatcher = JobDispatcher::new(adapter, UuidIdGen);
    Host::new(dispatcher, FsPathFinder, settings).with_project_root(std::env::current_dir().ok())
}

/// Find the le-worker binary
pub fn find_worker_binary() -> PathBuf {
    if let Some(path) = crate::env::worker_binary() {
        return PathBuf::from(path);
    }

    let current_exe = std::env::current_exe().ok();

    // Only trust CARGO_MANIFEST_DIR from a debug build of the CLI itself
    let is_debug_build = current_exe
        .as_ref()
        .and_then(|p| p.to_str())
        .is_some_and(|s| s.contains("target/debug"));

    if is_debug_build {
        if let Some(manifest_dir) = crate::env::cargo_manifest_dir() {
            let dev_path = PathBuf::from(manifest_dir)
                .parent()
                .and_then(|p| p.parent())
                .map(|p| p.join("target/debug").join(WORKER_BINARY));
            if let Some(path) = dev_path.filter(|p| p.exists()) {
                return path;
            }
        }
    }

    if let Some(dir) = current_exe.as_ref().and_then(|exe| exe.parent()) {
        let sibling = dir.join(WORKER_BINARY);
        if sibling.exists() {
            return sibling;
        }
    }

    PathBuf::from(WORKER_BINARY)
}
