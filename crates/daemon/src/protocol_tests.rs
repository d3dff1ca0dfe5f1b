// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::BufReader;

use serde_json::json;

use super::*;

#[test]
fn request_carries_injected_token() {
    let req = RpcRequest::new(1, "ping", json!({}), "tok123");
    assert_eq!(req.params["_token"], json!("tok123"));
    assert_eq!(req.method, "ping");
}

#[test]
fn request_roundtrips_through_a_single_line() {
    let req = RpcRequest::new(7, "status", json!({"foo": "bar"}), "tok");
    let mut line = serde_json::to_string(&req).unwrap();
    line.push('\n');
    let mut reader = BufReader::new(line.as_bytes());
    let parsed = read_request(&mut reader).unwrap();
    assert_eq!(parsed, req);
}

#[test]
fn empty_stream_is_connection_closed() {
    let mut reader = BufReader::new(&b""[..]);
    let err = read_request(&mut reader).unwrap_err();
    assert!(matches!(err, ProtocolError::ConnectionClosed));
}

#[test]
fn response_serializes_result_or_error_not_both() {
    let ok = RpcResponse::ok(1, json!({"pong": true}));
    let body = serde_json::to_value(&ok).unwrap();
    assert!(body.get("result").is_some());
    assert!(body.get("error").is_none());

    let err = RpcResponse::err(1, -32601, "unknown method".to_string());
    let body = serde_json::to_value(&err).unwrap();
    assert!(body.get("error").is_some());
    assert!(body.get("result").is_none());
}

#[test]
fn write_response_appends_newline() {
    let mut buf = Vec::new();
    write_response(&mut buf, &RpcResponse::ok(1, json!({}))).unwrap();
    assert_eq!(buf.last(), Some(&b'\n'));
}
