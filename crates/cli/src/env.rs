// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::time::Duration;

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Timeout for a single request/response round trip.
pub fn timeout_ipc() -> Duration {
    parse_duration_ms("RDC_TIMEOUT_IPC_MS").unwrap_or(Duration::from_secs(5))
}

/// How long `open` waits for the daemon to answer a `ping` (spec §4.1 step 4).
pub fn timeout_open() -> Duration {
    parse_duration_ms("RDC_TIMEOUT_OPEN_MS").unwrap_or(Duration::from_secs(15))
}

/// Polling interval while waiting for the daemon to come up.
pub fn poll_interval() -> Duration {
    parse_duration_ms("RDC_CONNECT_POLL_MS").unwrap_or(Duration::from_millis(50))
}

/// Override for locating `rdcd`, mainly useful in tests.
pub fn daemon_binary() -> Option<String> {
    std::env::var("RDC_DAEMON_BINARY").ok()
}

/// The session name to use when `--session` is not given.
pub fn default_session() -> String {
    std::env::var("RDC_SESSION").unwrap_or_else(|_| "default".to_string())
}
