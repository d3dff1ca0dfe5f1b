// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use rdc_adapters::{FakeReplayAdapter, ReplayAdapter};
use serde_json::json;

use super::*;
use crate::state::DaemonState;

fn no_replay_state() -> DaemonState {
    DaemonState::no_replay("tok".to_string(), "sess".to_string())
}

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
fn unknown_method_yields_method_unknown_code() {
    let mut state = no_replay_state();
    let (result, keep_running) = dispatch("nonexistent", &json!({}), &mut state);
    assert_eq!(result["error"]["code"], json!(-32601));
    assert!(keep_running);
}

#[test]
fn replay_required_method_without_adapter_yields_precondition_code() {
    let mut state = no_replay_state();
    let (result, _) = dispatch("info", &json!({}), &mut state);
    assert_eq!(result["error"]["code"], json!(-32002));
}

#[test]
fn no_replay_methods_work_without_an_adapter() {
    let mut state = no_replay_state();
    let (result, _) = dispatch("ping", &json!({}), &mut state);
    assert_eq!(result["pong"], json!(true));
}

#[test]
fn shutdown_reports_keep_running_false() {
    let mut state = opened_state();
    let (_, keep_running) = dispatch("shutdown", &json!({}), &mut state);
    assert!(!keep_running);
}

#[test]
fn successful_dispatch_updates_last_activity() {
    let mut state = opened_state();
    let before = state.last_activity;
    std::thread::sleep(std::time::Duration::from_millis(5));
    dispatch("info", &json!({}), &mut state);
    assert!(state.last_activity > before);
}

#[test]
fn invalid_params_surfaces_as_dedicated_code() {
    let mut state = opened_state();
    let (result, _) = dispatch("shader", &json!({"eid": 4}), &mut state);
    assert_eq!(result["error"]["code"], json!(-32602));
}
