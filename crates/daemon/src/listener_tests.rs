// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::sync::atomic::AtomicBool;

use rdc_adapters::{FakeReplayAdapter, ReplayAdapter};
use serde_json::{json, Value};

use super::*;

fn opened_state(token: &str) -> DaemonState {
    let mut adapter = FakeReplayAdapter::new();
    let info = adapter.open(std::path::Path::new("/tmp/seed.rdc")).unwrap();
    let mut state = DaemonState::opened(
        "/tmp/seed.rdc".into(),
        info,
        token.to_string(),
        "sess".to_string(),
        Box::new(adapter),
        std::env::temp_dir(),
    );
    state.temp_dir = None;
    state
}

fn send(port: u16, method: &str, token: &str) -> Value {
    let mut stream = TcpStream::connect(("127.0.0.1", port)).unwrap();
    let req = json!({"jsonrpc": "2.0", "id": 1, "method": method, "params": {"_token": token}});
    let mut line = serde_json::to_string(&req).unwrap();
    line.push('\n');
    stream.write_all(line.as_bytes()).unwrap();

    let mut reader = BufReader::new(stream);
    let mut response_line = String::new();
    reader.read_line(&mut response_line).unwrap();
    serde_json::from_str(&response_line).unwrap()
}

#[test]
fn ping_round_trips_over_tcp() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
    listener.set_nonblocking(true).unwrap();
    let port = listener.local_addr().unwrap().port();
    let mut state = opened_state("tok");
    let terminate = AtomicBool::new(false);

    let handle = std::thread::spawn(move || {
        run(&listener, &mut state, Duration::from_secs(30), Duration::from_millis(20), &terminate);
    });

    let response = send(port, "ping", "tok");
    assert_eq!(response["result"]["pong"], json!(true));

    let shutdown_response = send(port, "shutdown", "tok");
    assert!(shutdown_response.get("result").is_some());
    handle.join().unwrap();
}

#[test]
fn bad_token_is_rejected_without_touching_dispatch() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
    listener.set_nonblocking(true).unwrap();
    let port = listener.local_addr().unwrap().port();
    let mut state = opened_state("real-token");
    let terminate = AtomicBool::new(false);

    let handle = std::thread::spawn(move || {
        run(&listener, &mut state, Duration::from_secs(30), Duration::from_millis(20), &terminate);
    });

    let response = send(port, "ping", "wrong-token");
    assert_eq!(response["error"]["code"], json!(-32000));

    let shutdown_response = send(port, "shutdown", "real-token");
    assert!(shutdown_response.get("result").is_some());
    handle.join().unwrap();
}

#[test]
fn terminate_flag_stops_the_loop_without_a_client() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
    listener.set_nonblocking(true).unwrap();
    let mut state = opened_state("tok");
    let terminate = AtomicBool::new(true);

    run(&listener, &mut state, Duration::from_secs(30), Duration::from_millis(10), &terminate);
}
