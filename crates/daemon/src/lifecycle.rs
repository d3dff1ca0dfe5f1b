// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle: startup (bind, open capture, write descriptor) and
//! shutdown (close adapter, remove temp dir, remove descriptor). Both paths
//! are reached from three places — a `shutdown` RPC, SIGTERM/SIGINT, and the
//! idle timer — and must leave identical state behind (spec §4.8, §4.9, §5).

use std::net::TcpListener;
use std::path::PathBuf;
use std::time::Duration;

use rdc_adapters::{FakeReplayAdapter, ReplayAdapter};
use rdc_core::{generate_token, now_rfc3339, SessionDescriptor, SessionDescriptorError};
use rdc_engine::DaemonState;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session descriptor error: {0}")]
    Descriptor(#[from] SessionDescriptorError),

    #[error("failed to open capture {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rdc_adapters::AdapterError,
    },

    #[error("a session named `{0}` is already open for a different capture")]
    Conflict(String),
}

/// Startup configuration, assembled from argv/env (spec §4.1 step 3).
pub struct Config {
    pub session_name: String,
    pub capture_path: PathBuf,
    pub idle_timeout: Duration,
}

pub struct Started {
    pub listener: TcpListener,
    pub state: DaemonState,
}

/// Bind an ephemeral port, open the capture, and publish the session
/// descriptor. The descriptor is written last so a reader never observes a
/// port with nothing listening on it.
pub fn startup(config: &Config) -> Result<Started, LifecycleError> {
    if let Ok(existing) = SessionDescriptor::load(&config.session_name) {
        if !existing.is_stale() && existing.capture != config.capture_path {
            return Err(LifecycleError::Conflict(config.session_name.clone()));
        }
    }

    let listener = TcpListener::bind(("127.0.0.1", 0))?;
    listener.set_nonblocking(true)?;
    let port = listener.local_addr()?.port();

    let token = generate_token();
    let mut adapter = FakeReplayAdapter::new();
    let capture_info = adapter
        .open(&config.capture_path)
        .map_err(|source| LifecycleError::OpenFailed {
            path: config.capture_path.clone(),
            source,
        })?;

    let temp_dir = session_temp_dir(&config.session_name);
    std::fs::create_dir_all(&temp_dir)?;

    let state = DaemonState::opened(
        config.capture_path.clone(),
        capture_info,
        token.clone(),
        config.session_name.clone(),
        Box::new(adapter),
        temp_dir,
    );

    let descriptor = SessionDescriptor {
        pid: std::process::id(),
        host: "127.0.0.1".to_string(),
        port,
        token: token.clone(),
        capture: config.capture_path.clone(),
        opened_at: now_rfc3339(),
        current_eid: 0,
    };
    descriptor.create(&config.session_name)?;

    Ok(Started { listener, state })
}

/// Clean shutdown: release the adapter's native resources, remove the
/// session temp directory, delete the descriptor. Reached from the
/// `shutdown` RPC, SIGTERM/SIGINT, and idle-timeout expiry alike, so it
/// must not assume any particular caller (spec invariant 9).
pub fn shutdown(state: &mut DaemonState, session_name: &str) {
    if let Some(adapter) = state.adapter.as_deref_mut() {
        adapter.shutdown();
    }
    if let Some(temp_dir) = state.temp_dir.take() {
        let _ = std::fs::remove_dir_all(&temp_dir);
    }
    let _ = SessionDescriptor::remove(session_name);
}

fn session_temp_dir(session_name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("rdc-{session_name}-{}", std::process::id()))
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
