// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use rdc_adapters::{FakeReplayAdapter, ReplayAdapter};
use serde_json::json;

use super::*;
use crate::state::DaemonState;

fn opened_state() -> DaemonState {
    let mut adapter = FakeReplayAdapter::new();
    let info = adapter.open(std::path::Path::new("/tmp/seed.rdc")).unwrap();
    DaemonState::opened(
        "/tmp/seed.rdc".into(),
        info,
        "tok".to_string(),
        "sess".to_string(),
        Box::new(adapter),
        "/tmp/rdc-sess".into(),
    )
}

#[test]
fn postvs_returns_three_rows() {
    let mut state = opened_state();
    let (result, _) = postvs(&json!({"eid": 4}), &mut state).unwrap();
    assert_eq!(result["rows"].as_array().unwrap().len(), 3);
}

#[test]
fn ibuffer_decode_returns_rows() {
    let mut state = opened_state();
    let (result, _) = ibuffer_decode(&json!({"eid": 4}), &mut state).unwrap();
    assert_eq!(result["rows"].as_array().unwrap().len(), 3);
}

#[test]
fn cbuffer_decode_flattens_world_matrix() {
    let mut state = opened_state();
    let (result, _) = cbuffer_decode(&json!({"eid": 4, "stage": "Pixel", "set": 0, "binding": 0}), &mut state).unwrap();
    let vars = result["variables"].as_array().unwrap();
    assert!(vars.iter().any(|v| v["name"].as_str().unwrap() == "worldMatrix"));
}

#[test]
fn cbuffer_decode_rejects_unbound_descriptor() {
    let mut state = opened_state();
    let err = cbuffer_decode(&json!({"eid": 4, "stage": "Pixel", "set": 9, "binding": 9}), &mut state).unwrap_err();
    assert!(matches!(err, RdcError::NotFound(_)));
}
