// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use rdc_adapters::{FakeReplayAdapter, ReplayAdapter};
use rdc_core::{ActionFlags, ActionNode, ActionTree};

use super::*;

#[test]
fn seed_capture_yields_three_passes_with_expected_draw_counts() {
    let adapter = FakeReplayAdapter::new();
    let tree = adapter.root_actions();
    let passes = detect_passes(&tree);

    assert_eq!(passes.len(), 3);
    assert_eq!(passes[0].name, "Shadow");
    assert_eq!(passes[0].draws, 10);
    assert_eq!(passes[1].name, "GBuffer");
    assert_eq!(passes[1].draws, 20);
    assert_eq!(passes[2].name, "UI");
    assert_eq!(passes[2].draws, 5);
}

#[test]
fn container_nodes_with_both_markers_are_excluded() {
    // A command-buffer submission whose own flags already aggregate
    // BeginPass and EndPass from the two passes it wraps.
    let pass_a = ActionNode::new(2, "vkCmdBeginRenderPass(C=Clear)", ActionFlags::BEGIN_PASS)
        .with_children(vec![
            ActionNode::new(3, "Draw", ActionFlags::DRAWCALL),
            ActionNode::new(4, "vkCmdEndRenderPass()", ActionFlags::END_PASS),
        ]);
    let pass_b = ActionNode::new(5, "vkCmdBeginRenderPass(C=Clear)", ActionFlags::BEGIN_PASS)
        .with_children(vec![
            ActionNode::new(6, "Draw", ActionFlags::DRAWCALL),
            ActionNode::new(7, "vkCmdEndRenderPass()", ActionFlags::END_PASS),
        ]);
    let container = ActionNode::new(1, "vkQueueSubmit", ActionFlags::BEGIN_PASS | ActionFlags::END_PASS)
        .with_children(vec![pass_a, pass_b]);

    let tree = ActionTree {
        roots: vec![container],
        max_eid: 7,
    };
    let passes = detect_passes(&tree);

    assert_eq!(passes.len(), 2);
    assert!(passes.iter().all(|p| p.name != "vkQueueSubmit"));
}

#[test]
fn bare_draws_directly_under_a_pass_do_not_each_become_their_own_pass() {
    // Draws with no enclosing marker group: children of the pass node are
    // themselves draw/dispatch leaves, not groups that contain draws.
    let pass = ActionNode::new(2, "vkCmdBeginRenderPass(C=Clear)", ActionFlags::BEGIN_PASS).with_children(vec![
        ActionNode::new(3, "vkCmdDrawIndexed", ActionFlags::DRAWCALL),
        ActionNode::new(4, "vkCmdDrawIndexed", ActionFlags::DRAWCALL),
        ActionNode::new(5, "vkCmdEndRenderPass()", ActionFlags::END_PASS),
    ]);

    let tree = ActionTree { roots: vec![pass], max_eid: 5 };
    let passes = detect_passes(&tree);

    assert_eq!(passes.len(), 1);
    assert_eq!(passes[0].name, friendly_name("vkCmdBeginRenderPass(C=Clear)", 1));
    assert_eq!(passes[0].draws, 2);
}

#[test]
fn friendly_name_counts_color_and_depth_attachments() {
    assert_eq!(
        friendly_name("vkCmdBeginRenderPass(C=Clear, D=Clear)", 1),
        "Colour Pass #1 (1 Target + Depth)"
    );
    assert_eq!(
        friendly_name("vkCmdBeginRenderPass(C=Clear, C=Clear, C=Clear, D=Clear)", 2),
        "Colour Pass #2 (3 Targets + Depth)"
    );
}

#[test]
fn friendly_name_falls_back_to_parenthesised_suffix() {
    assert_eq!(friendly_name("vkCmdBeginRenderPass(Clear)", 4), "Colour Pass #4 (Clear)");
}

#[test]
fn end_eid_is_max_draw_eid_not_end_marker_eid() {
    let adapter = FakeReplayAdapter::new();
    let tree = adapter.root_actions();
    let passes = detect_passes(&tree);
    // Shadow: begin=2, group=3, draws 4..=13, end marker=14.
    assert_eq!(passes[0].begin_eid, 2);
    assert_eq!(passes[0].end_eid, 13);
}
