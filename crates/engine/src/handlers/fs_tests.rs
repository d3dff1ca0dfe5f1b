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
fn vfs_ls_root_contains_mandated_entries() {
    let mut state = opened_state();
    let (result, _) = vfs_ls(&json!({"path": "/"}), &mut state).unwrap();
    let children: Vec<String> = result["children"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    for expected in [
        "info", "stats", "log", "events", "draws", "passes", "resources", "textures", "buffers",
        "shaders", "counters", "current",
    ] {
        assert!(children.contains(&expected.to_string()), "missing {expected}");
    }
}

#[test]
fn vfs_tree_rejects_depth_zero() {
    let mut state = opened_state();
    let err = vfs_tree(&json!({"path": "/", "depth": 0}), &mut state).unwrap_err();
    assert!(matches!(err, RdcError::InvalidParams(_)));
}

#[test]
fn vfs_tree_rejects_depth_nine() {
    let mut state = opened_state();
    let err = vfs_tree(&json!({"path": "/", "depth": 9}), &mut state).unwrap_err();
    assert!(matches!(err, RdcError::InvalidParams(_)));
}

#[test]
fn vfs_ls_populates_draw_shader_subtree_through_the_live_adapter() {
    let mut state = opened_state();
    let (result, _) = vfs_ls(&json!({"path": "/draws/4/shader"}), &mut state).unwrap();
    let stages: Vec<String> = result["children"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert!(stages.contains(&"Vertex".to_string()));
    assert!(stages.contains(&"Pixel".to_string()));
}
