// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the adapters crate.

use crate::subprocess::WORKER_KILL_GRACE;
use std::time::Duration;

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Upper bound for a single engine run; unbounded unless set.
pub fn engine_timeout() -> Option<Duration> {
    parse_duration_ms("LE_ENGINE_TIMEOUT_MS").filter(|d| !d.is_zero())
}

/// Grace period between closing a worker's stdin and killing it (default: 2s).
pub fn worker_kill_grace() -> Duration {
    parse_duration_ms("LE_WORKER_KILL_GRACE_MS").unwrap_or(WORKER_KILL_GRACE)
}
