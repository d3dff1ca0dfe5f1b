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
fn info_reports_capture_metadata_and_counts() {
    let mut state = opened_state();
    let (result, _) = info(&json!({}), &mut state).unwrap();
    assert_eq!(result["api_name"], json!("Vulkan"));
    assert_eq!(result["draw_count"], json!(35));
}

#[test]
fn stats_lists_three_passes() {
    let mut state = opened_state();
    let (result, _) = stats(&json!({}), &mut state).unwrap();
    assert_eq!(result["passes"].as_array().unwrap().len(), 3);
}

#[test]
fn events_filters_by_type() {
    let mut state = opened_state();
    let (result, _) = events(&json!({"type": "draw"}), &mut state).unwrap();
    assert_eq!(result["events"].as_array().unwrap().len(), 35);
}

#[test]
fn draws_filtered_by_pass_matches_pass_draw_count() {
    let mut state = opened_state();
    let (result, _) = draws(&json!({"pass": "Shadow"}), &mut state).unwrap();
    assert_eq!(result["draws"].as_array().unwrap().len(), 10);
}

#[test]
fn event_rejects_unknown_eid() {
    let mut state = opened_state();
    let err = event(&json!({"eid": 9999}), &mut state).unwrap_err();
    assert!(matches!(err, RdcError::Precondition(_)));
}

#[test]
fn draw_does_not_move_current_eid() {
    let mut state = opened_state();
    state.replay_head.current_eid = 1;
    let (_, _) = draw(&json!({"eid": 4}), &mut state).unwrap();
    assert_eq!(state.replay_head.current_eid, 1, "query handlers must not move the cursor");
}

#[test]
fn log_returns_empty_for_seed_capture() {
    let mut state = opened_state();
    let (result, _) = log(&json!({}), &mut state).unwrap();
    assert_eq!(result["messages"].as_array().unwrap().len(), 0);
}
