// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon binary.

use std::time::Duration;

/// Idle-timeout override, `RDC_IDLE_TIMEOUT_S` (spec §4.9, default 1800s).
pub fn idle_timeout() -> Duration {
    std::env::var("RDC_IDLE_TIMEOUT_S")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_secs(1800))
}

/// Accept-loop poll interval when idle (not part of the wire protocol;
/// governs how promptly the idle timer and shutdown flag are noticed).
pub fn accept_poll_interval() -> Duration {
    std::env::var("RDC_ACCEPT_POLL_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_millis(200))
}
