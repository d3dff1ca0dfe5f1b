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
fn debug_pixel_returns_finished_trace() {
    let mut state = opened_state();
    let (result, _) = debug_pixel(&json!({"eid": 4, "x": 10, "y": 20}), &mut state).unwrap();
    assert_eq!(result["finished"], json!(true));
    assert!(!result["steps"].as_array().unwrap().is_empty());
}

#[test]
fn debug_vertex_returns_finished_trace() {
    let mut state = opened_state();
    let (result, _) = debug_vertex(&json!({"eid": 4, "vertex_id": 1}), &mut state).unwrap();
    assert_eq!(result["finished"], json!(true));
}

#[test]
fn debug_thread_rejects_non_dispatch_eid() {
    let mut state = opened_state();
    let err = debug_thread(&json!({"eid": 4, "group": [0, 0, 0], "thread": [0, 0, 0]}), &mut state).unwrap_err();
    assert!(matches!(err, RdcError::DebugUnavailable(_)));
}

#[test]
fn triple_rejects_wrong_length() {
    let mut state = opened_state();
    let err = debug_thread(&json!({"eid": 4, "group": [0, 0], "thread": [0, 0, 0]}), &mut state).unwrap_err();
    assert!(matches!(err, RdcError::InvalidParams(_)));
}
