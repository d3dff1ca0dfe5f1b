// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon client: session resolution, the fork/wait-for-ping `open` sequence
//! (spec §4.1), and one-request-per-connection RPC (spec §4.2).

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpStream;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Instant;

use rdc_core::{SessionDescriptor, SessionDescriptorError};
use rdc_daemon::protocol::{ProtocolError, RpcRequest, RpcResponse};
use serde_json::Value;
use thiserror::Error;

use crate::env;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no active session `{0}`")]
    NoActiveSession(String),

    #[error("session descriptor error: {0}")]
    Descriptor(#[from] SessionDescriptorError),

    #[error("a session named `{0}` is already open for a different capture")]
    Conflict(String),

    #[error("failed to start daemon: {0}")]
    DaemonStartFailed(String),

    #[error("timed out waiting for the daemon to start")]
    DaemonStartTimeout,

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{message}")]
    Rejected { code: i32, message: String },
}

/// A resolved, live session: host/port/token read from the descriptor.
pub struct DaemonClient {
    host: String,
    port: u16,
    token: String,
    next_id: AtomicI64,
}

impl DaemonClient {
    /// Resolve `name` by reading its descriptor file. Fails with
    /// [`ClientError::NoActiveSession`] if absent or stale, without ever
    /// attempting a TCP connection (spec §4.1).
    pub fn connect(name: &str) -> Result<Self, ClientError> {
        let descriptor = SessionDescriptor::load(name).map_err(|_| ClientError::NoActiveSession(name.to_string()))?;
        if descriptor.is_stale() {
            let _ = SessionDescriptor::remove(name);
            return Err(ClientError::NoActiveSession(name.to_string()));
        }
        Ok(Self {
            host: descriptor.host,
            port: descriptor.port,
            token: descriptor.token,
            next_id: AtomicI64::new(1),
        })
    }

    /// Send one request and read its response. Opens a fresh connection per
    /// call since the wire protocol is one request, one response, close
    /// (spec §4.2).
    pub fn send(&self, method: &str, params: Value) -> Result<Value, ClientError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let request = RpcRequest::new(id, method, params, &self.token);

        let mut stream = TcpStream::connect((self.host.as_str(), self.port))?;
        stream.set_read_timeout(Some(env::timeout_ipc()))?;
        stream.set_write_timeout(Some(env::timeout_ipc()))?;

        let mut line = serde_json::to_string(&request).map_err(ProtocolError::from)?;
        line.push('\n');
        stream.write_all(line.as_bytes())?;
        stream.flush()?;

        let mut reader = BufReader::new(stream);
        let mut response_line = String::new();
        let n = reader.read_line(&mut response_line)?;
        if n == 0 {
            return Err(ClientError::Protocol(ProtocolError::ConnectionClosed));
        }
        let response: RpcResponse = serde_json::from_str(response_line.trim_end()).map_err(ProtocolError::from)?;

        match (response.result, response.error) {
            (Some(result), None) => Ok(result),
            (None, Some(error)) => Err(ClientError::Rejected { code: error.code, message: error.message }),
            _ => Err(ClientError::Protocol(ProtocolError::ConnectionClosed)),
        }
    }
}

/// `open capture [--session NAME]` (spec §4.1).
///
/// Forks `rdcd`, then waits up to [`env::timeout_open`] for the session
/// descriptor to appear and answer a `ping`. The daemon's stderr is piped
/// but never read until `try_wait` reports the process has exited, so a
/// daemon that is merely slow to start can never deadlock the CLI on a full
/// pipe.
pub fn open(capture: &Path, session_name: &str) -> Result<(), ClientError> {
    if let Ok(existing) = SessionDescriptor::load(session_name) {
        if !existing.is_stale() && existing.capture != capture {
            return Err(ClientError::Conflict(session_name.to_string()));
        }
    }

    let mut child = Command::new(daemon_binary_path())
        .arg(capture)
        .arg(session_name)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ClientError::DaemonStartFailed(e.to_string()))?;

    let deadline = Instant::now() + env::timeout_open();
    loop {
        if let Ok(Some(status)) = child.try_wait() {
            let mut stderr = String::new();
            if let Some(mut pipe) = child.stderr.take() {
                let _ = pipe.read_to_string(&mut stderr);
            }
            let detail = if stderr.trim().is_empty() { format!("exited with {status}") } else { stderr.trim().to_string() };
            return Err(ClientError::DaemonStartFailed(detail));
        }

        if SessionDescriptor::load(session_name).is_ok() {
            if let Ok(client) = DaemonClient::connect(session_name) {
                if client.send("ping", serde_json::json!({})).is_ok() {
                    return Ok(());
                }
            }
        }

        if Instant::now() >= deadline {
            let _ = child.kill();
            return Err(ClientError::DaemonStartTimeout);
        }
        std::thread::sleep(env::poll_interval());
    }
}

/// `close`: send `shutdown`, then delete the descriptor regardless of
/// whether the RPC succeeded (spec §4.1).
pub fn close(session_name: &str) -> Result<(), ClientError> {
    let result = DaemonClient::connect(session_name).and_then(|c| c.send("shutdown", serde_json::json!({})).map(|_| ()));
    let _ = SessionDescriptor::remove(session_name);
    result
}

fn daemon_binary_path() -> PathBuf {
    if let Some(path) = env::daemon_binary() {
        return PathBuf::from(path);
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let sibling = dir.join("rdcd");
            if sibling.exists() {
                return sibling;
            }
        }
    }
    PathBuf::from("rdcd")
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
