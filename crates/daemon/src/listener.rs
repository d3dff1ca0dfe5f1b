// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-threaded cooperative accept loop (spec §5). Exactly one
//! connection is handled to completion before the next is accepted; no
//! per-connection threads or tasks are spawned. The replay engine holds
//! global GPU-context state that is not safe to share across connections.

use std::io::BufReader;
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rdc_core::tokens_equal;
use rdc_engine::DaemonState;
use tracing::{debug, error, info, warn};

use rdc_daemon::protocol::{self, ProtocolError, RpcResponse, DEFAULT_CLIENT_TIMEOUT};

/// Run the accept loop until a `shutdown` RPC, the idle timer expires, or
/// `terminate` is observed set (SIGTERM/SIGINT). Returns when the daemon
/// should exit; callers are responsible for calling `lifecycle::shutdown`
/// afterward.
pub fn run(
    listener: &TcpListener,
    state: &mut DaemonState,
    idle_timeout: Duration,
    poll_interval: Duration,
    terminate: &AtomicBool,
) {
    loop {
        match listener.accept() {
            Ok((stream, _addr)) => {
                let keep_running = handle_connection(stream, state);
                if !keep_running {
                    info!("shutdown requested by client");
                    return;
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                if terminate.load(Ordering::SeqCst) {
                    info!("terminating on signal");
                    return;
                }
                if state.last_activity.elapsed() >= idle_timeout {
                    info!(idle_timeout_s = idle_timeout.as_secs(), "idle timeout expired");
                    return;
                }
                std::thread::sleep(poll_interval);
            }
            Err(e) => {
                error!("accept error: {e}");
            }
        }
    }
}

/// Handle one connection to completion: one request, one response, then
/// close (spec §4.2). Returns whether the accept loop should keep running.
fn handle_connection(stream: TcpStream, state: &mut DaemonState) -> bool {
    if let Err(e) = stream.set_read_timeout(Some(DEFAULT_CLIENT_TIMEOUT)) {
        warn!("failed to set read timeout: {e}");
    }
    let mut writer = match stream.try_clone() {
        Ok(w) => w,
        Err(e) => {
            error!("failed to clone connection: {e}");
            return true;
        }
    };
    let mut reader = BufReader::new(stream);

    let request = match protocol::read_request(&mut reader) {
        Ok(req) => req,
        Err(ProtocolError::ConnectionClosed) => {
            debug!("client disconnected before sending a request");
            return true;
        }
        Err(e) => {
            warn!("malformed request: {e}");
            return true;
        }
    };

    let token = request.params.get("_token").and_then(|v| v.as_str()).unwrap_or("");
    if !tokens_equal(token, &state.token) {
        let _ = protocol::write_response(
            &mut writer,
            &RpcResponse::err(request.id, rdc_core::ErrorCode::Unauthorized.code(), "unauthorized".to_string()),
        );
        return true;
    }

    debug!(method = %request.method, "dispatching request");
    let (body, keep_running) = rdc_engine::dispatch(&request.method, &request.params, state);

    let response = match body.get("error") {
        Some(error) => {
            let code = error.get("code").and_then(|c| c.as_i64()).unwrap_or(-32603) as i32;
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("internal error")
                .to_string();
            RpcResponse::err(request.id, code, message)
        }
        None => RpcResponse::ok(request.id, body),
    };

    if let Err(e) = protocol::write_response(&mut writer, &response) {
        warn!("failed to write response: {e}");
    }

    keep_running
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
