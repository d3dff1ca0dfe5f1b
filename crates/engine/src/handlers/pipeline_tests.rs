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
fn pipeline_without_section_returns_topology_only() {
    let mut state = opened_state();
    let (result, _) = pipeline(&json!({"eid": 4}), &mut state).unwrap();
    assert!(result.get("primitive_topology").is_some());
    assert!(result.get("section").is_none());
}

#[test]
fn pipeline_with_section_returns_detail() {
    let mut state = opened_state();
    let (result, _) = pipeline(&json!({"eid": 4, "section": "viewport"}), &mut state).unwrap();
    assert_eq!(result["section"], json!("viewport"));
    assert!(result["detail"].is_array());
}

#[test]
fn pipe_section_macro_handlers_do_not_move_cursor() {
    let mut state = opened_state();
    state.replay_head.current_eid = 1;
    let (_, _) = pipe_viewport(&json!({"eid": 4}), &mut state).unwrap();
    assert_eq!(state.replay_head.current_eid, 1);
}

#[test]
fn bindings_filters_by_binding_index() {
    let mut state = opened_state();
    let (all, _) = bindings(&json!({"eid": 4}), &mut state).unwrap();
    let all_count = all["bindings"].as_array().unwrap().len();
    assert!(all_count > 0);
    let (filtered, _) = bindings(&json!({"eid": 4, "binding": 0}), &mut state).unwrap();
    assert!(filtered["bindings"].as_array().unwrap().len() <= all_count);
}

#[test]
fn descriptors_lists_full_table() {
    let mut state = opened_state();
    let (result, _) = descriptors(&json!({"eid": 4}), &mut state).unwrap();
    assert!(!result["descriptors"].as_array().unwrap().is_empty());
}

#[test]
fn section_unknown_name_rejected() {
    let mut state = opened_state();
    let err = pipeline(&json!({"eid": 4, "section": "nope"}), &mut state).unwrap_err();
    assert!(matches!(err, RdcError::InvalidParams(_)));
}
