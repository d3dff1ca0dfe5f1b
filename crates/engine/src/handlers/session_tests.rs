// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use rdc_adapters::{FakeReplayAdapter, ReplayAdapter};
use serde_json::json;

use super::*;

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
fn ping_always_succeeds() {
    let mut state = DaemonState::no_replay("tok".to_string(), "sess".to_string());
    let (result, keep_running) = ping(&json!({}), &mut state).unwrap();
    assert_eq!(result["pong"], json!(true));
    assert!(keep_running);
}

#[test]
fn goto_without_adapter_is_bookkeeping_only() {
    let mut state = DaemonState::no_replay("tok".to_string(), "sess".to_string());
    let (result, _) = goto(&json!({"eid": 7}), &mut state).unwrap();
    assert_eq!(result["current_eid"], json!(7));
    assert_eq!(state.replay_head.current_eid, 7);
}

#[test]
fn goto_with_adapter_rejects_eid_past_max() {
    let mut state = opened_state();
    let max = state.max_eid();
    let err = goto(&json!({"eid": max + 1}), &mut state).unwrap_err();
    assert!(matches!(err, RdcError::Precondition(_)));
}

#[test]
fn goto_with_adapter_moves_current_eid() {
    let mut state = opened_state();
    let (result, _) = goto(&json!({"eid": 4}), &mut state).unwrap();
    assert_eq!(result["current_eid"], json!(4));
    assert_eq!(state.replay_head.current_eid, 4);
}

#[test]
fn shutdown_signals_stop() {
    let mut state = opened_state();
    let (_, keep_running) = shutdown(&json!({}), &mut state).unwrap();
    assert!(!keep_running);
}

#[test]
fn count_draws_matches_seed_scenario() {
    let mut state = opened_state();
    let (result, _) = count(&json!({"what": "draws"}), &mut state).unwrap();
    assert_eq!(result["count"], json!(35));
}

#[test]
fn count_passes_matches_seed_scenario() {
    let mut state = opened_state();
    let (result, _) = count(&json!({"what": "passes"}), &mut state).unwrap();
    assert_eq!(result["count"], json!(3));
}
