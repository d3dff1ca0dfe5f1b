// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn seed_tree_has_fifty_events() {
    let adapter = FakeReplayAdapter::new();
    assert_eq!(adapter.root_actions().max_eid, 50);
    assert_eq!(adapter.root_actions().iter().count(), 50);
}

#[test]
fn seed_tree_has_three_passes_with_expected_draw_counts() {
    let adapter = FakeReplayAdapter::new();
    let tree = adapter.root_actions();

    let shadow = tree
        .roots
        .iter()
        .find(|n| n.flags.contains(ActionFlags::BEGIN_PASS) && n.children[0].name == "Shadow")
        .unwrap();
    assert_eq!(shadow.iter().filter(|d| d.is_draw()).count(), 10);

    let gbuffer = tree
        .roots
        .iter()
        .find(|n| n.flags.contains(ActionFlags::BEGIN_PASS) && n.children[0].name == "GBuffer")
        .unwrap();
    assert_eq!(gbuffer.iter().filter(|d| d.is_draw()).count(), 20);

    let ui = tree
        .roots
        .iter()
        .find(|n| n.flags.contains(ActionFlags::BEGIN_PASS) && n.children[0].name == "UI")
        .unwrap();
    assert_eq!(ui.iter().filter(|d| d.is_draw()).count(), 5);
}

#[test]
fn seed_tree_has_two_textures_and_two_buffers() {
    let adapter = FakeReplayAdapter::new();
    assert_eq!(adapter.textures().len(), 2);
    assert_eq!(adapter.buffers().len(), 2);
}

#[test]
fn every_draw_has_vertex_and_pixel_shader() {
    let mut adapter = FakeReplayAdapter::new();
    let tree = adapter.root_actions();
    for draw in tree.iter().filter(|n| n.is_draw()) {
        adapter.set_frame_event(draw.eid, false).unwrap();
        let state = adapter.pipeline_state().unwrap();
        let stages: Vec<&str> = state.shaders.iter().map(|s| s.stage.as_str()).collect();
        assert!(stages.contains(&"Vertex"));
        assert!(stages.contains(&"Pixel"));
    }
}

#[test]
fn set_frame_event_rejects_eid_beyond_max() {
    let mut adapter = FakeReplayAdapter::new();
    let max = adapter.root_actions().max_eid;
    assert!(adapter.set_frame_event(max + 1, true).is_err());
    assert!(adapter.set_frame_event(max, true).is_ok());
    assert_eq!(adapter.head_eid(), max);
}

#[test]
fn pipeline_state_rejects_non_draw_eid() {
    let mut adapter = FakeReplayAdapter::new();
    // eid 1 is the leading Clear action, not a draw.
    adapter.set_frame_event(1, false).unwrap();
    assert!(adapter.pipeline_state().is_err());
}

#[test]
fn open_and_shutdown_are_recorded() {
    let mut adapter = FakeReplayAdapter::new();
    adapter.open(Path::new("/tmp/frame.rdc")).unwrap();
    adapter.shutdown();
    let calls = adapter.calls();
    assert!(matches!(calls[0], AdapterCall::Open(_)));
    assert!(matches!(calls[1], AdapterCall::Shutdown));
    assert!(adapter.is_open());
}

#[test]
fn counters_roundtrip() {
    let adapter = FakeReplayAdapter::new();
    let counters = adapter.counters();
    let uuids: Vec<String> = counters.iter().map(|c| c.uuid.clone()).collect();
    let results = adapter.fetch_counters(&[2], &uuids).unwrap();
    assert_eq!(results.len(), uuids.len());
    assert!(adapter.fetch_counters(&[2], &["nope".to_string()]).is_err());
}

#[test]
fn save_texture_writes_png_header_to_disk() {
    let adapter = FakeReplayAdapter::new();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("tex.png");
    let spec = TextureExportSpec {
        resource_id: "tex-0001".to_string(),
        mip: 0,
        slice: 0,
        format: TextureExportFormat::Png,
    };
    let size = adapter.save_texture(&spec, &out).unwrap();
    assert!(size > 0);
    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
}

#[test]
fn debug_thread_requires_dispatch_node() {
    let mut adapter = FakeReplayAdapter::new();
    // eid 1 is a Clear action, never a compute dispatch.
    adapter.set_frame_event(1, false).unwrap();
    let res = adapter.debug_thread([0, 0, 0], [0, 0, 0]);
    assert!(res.is_err());
}
