// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use rdc_adapters::{FakeReplayAdapter, ReplayAdapter};
use serde_json::json;
use tempfile::tempdir;

use super::*;
use crate::state::DaemonState;

fn opened_state_with_temp(dir: &std::path::Path) -> DaemonState {
    let mut adapter = FakeReplayAdapter::new();
    let info = adapter.open(std::path::Path::new("/tmp/seed.rdc")).unwrap();
    DaemonState::opened(
        "/tmp/seed.rdc".into(),
        info,
        "tok".to_string(),
        "sess".to_string(),
        Box::new(adapter),
        dir.to_path_buf(),
    )
}

#[test]
fn resources_lists_textures_and_buffers() {
    let dir = tempdir().unwrap();
    let mut state = opened_state_with_temp(dir.path());
    let (result, _) = resources(&json!({}), &mut state).unwrap();
    assert_eq!(result["resources"].as_array().unwrap().len(), 4);
}

#[test]
fn resource_unknown_id_not_found() {
    let dir = tempdir().unwrap();
    let mut state = opened_state_with_temp(dir.path());
    let err = resource(&json!({"id": "nope"}), &mut state).unwrap_err();
    assert!(matches!(err, RdcError::NotFound(_)));
}

#[test]
fn tex_export_writes_file_and_returns_path() {
    let dir = tempdir().unwrap();
    let mut state = opened_state_with_temp(dir.path());
    let (result, _) = tex_export(&json!({"id": "tex-0001"}), &mut state).unwrap();
    let path = result["path"].as_str().unwrap();
    assert!(std::path::Path::new(path).exists());
}

#[test]
fn buf_raw_writes_requested_length() {
    let dir = tempdir().unwrap();
    let mut state = opened_state_with_temp(dir.path());
    let (result, _) = buf_raw(&json!({"id": "buf-vertex-0001", "length": 32}), &mut state).unwrap();
    assert_eq!(result["size"], json!(32));
}

#[test]
fn counters_lists_gpu_duration() {
    let dir = tempdir().unwrap();
    let mut state = opened_state_with_temp(dir.path());
    let (result, _) = counters(&json!({}), &mut state).unwrap();
    assert_eq!(result["counters"].as_array().unwrap().len(), 1);
}

#[test]
fn fetch_counters_rejects_unknown_uuid() {
    let dir = tempdir().unwrap();
    let mut state = opened_state_with_temp(dir.path());
    let err = fetch_counters(&json!({"eids": [4], "uuids": ["nope"]}), &mut state).unwrap_err();
    assert!(matches!(err, RdcError::NotFound(_)));
}

#[test]
fn usage_reports_draws_binding_the_resource() {
    let dir = tempdir().unwrap();
    let mut state = opened_state_with_temp(dir.path());
    let (result, _) = usage(&json!({"id": "tex-0001"}), &mut state).unwrap();
    assert!(!result["used_by_draws"].as_array().unwrap().is_empty());
}
