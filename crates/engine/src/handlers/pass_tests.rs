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
fn passes_lists_all_three() {
    let mut state = opened_state();
    let (result, _) = passes(&json!({}), &mut state).unwrap();
    assert_eq!(result["passes"].as_array().unwrap().len(), 3);
}

#[test]
fn pass_lookup_by_name_matches_lookup_by_index() {
    let mut state = opened_state();
    let (by_name, _) = pass(&json!({"name": "GBuffer"}), &mut state).unwrap();
    let (by_index, _) = pass(&json!({"index": 1}), &mut state).unwrap();
    assert_eq!(by_name["begin_eid"], by_index["begin_eid"]);
    assert_eq!(by_name["draws"], json!(20));
}

#[test]
fn pass_does_not_move_current_eid() {
    let mut state = opened_state();
    state.replay_head.current_eid = 1;
    let (_, _) = pass(&json!({"name": "Shadow"}), &mut state).unwrap();
    assert_eq!(state.replay_head.current_eid, 1);
}

#[test]
fn pass_unknown_name_not_found() {
    let mut state = opened_state();
    let err = pass(&json!({"name": "nope"}), &mut state).unwrap_err();
    assert!(matches!(err, RdcError::NotFound(_)));
}
