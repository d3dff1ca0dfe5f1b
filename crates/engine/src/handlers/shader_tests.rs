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
fn shader_looks_up_by_stage() {
    let mut state = opened_state();
    let (result, _) = shader(&json!({"eid": 4, "stage": "Vertex"}), &mut state).unwrap();
    assert_eq!(result["shader_id"], json!("shader-vs-0001"));
}

#[test]
fn shader_unknown_stage_not_found() {
    let mut state = opened_state();
    let err = shader(&json!({"eid": 4, "stage": "Hull"}), &mut state).unwrap_err();
    assert!(matches!(err, RdcError::NotFound(_)));
}

#[test]
fn shader_map_covers_every_draw() {
    let mut state = opened_state();
    let (result, _) = shader_map(&json!({}), &mut state).unwrap();
    assert_eq!(result["draws"].as_array().unwrap().len(), 35);
}

#[test]
fn shader_reflect_returns_constant_blocks() {
    let mut state = opened_state();
    let (result, _) = shader_reflect(&json!({"eid": 4, "stage": "Vertex"}), &mut state).unwrap();
    assert!(!result["constant_blocks"].as_array().unwrap().is_empty());
}

#[test]
fn shader_source_falls_back_to_disassembly_without_debug_info() {
    let mut state = opened_state();
    let (result, _) = shader_source(&json!({"eid": 4, "stage": "Pixel"}), &mut state).unwrap();
    assert_eq!(result["has_debug_info"], json!(false));
    assert!(result["source_files"].as_array().unwrap().is_empty());
    assert!(result["disassembly"].as_str().unwrap().contains("shader-ps"));
}

#[test]
fn shader_disasm_rejects_unknown_target() {
    let mut state = opened_state();
    let err = shader_disasm(&json!({"eid": 4, "stage": "Vertex", "target": "nope"}), &mut state).unwrap_err();
    assert!(matches!(err, RdcError::InvalidParams(_)));
}

#[test]
fn shader_constants_flattens_matrix_variable() {
    let mut state = opened_state();
    let (result, _) = shader_constants(&json!({"eid": 4, "stage": "Vertex"}), &mut state).unwrap();
    let vars = result["variables"].as_array().unwrap();
    assert!(vars.iter().any(|v| v["name"].as_str().unwrap().contains("worldMatrix")));
}
