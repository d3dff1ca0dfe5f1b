// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn draw(eid: Eid) -> ActionNode {
    ActionNode::new(eid, format!("Draw({eid})"), ActionFlags::DRAWCALL)
}

#[test]
fn iter_is_depth_first_and_eid_ordered() {
    let tree = ActionNode::new(1, "Pass", ActionFlags::BEGIN_PASS).with_children(vec![
        draw(2),
        draw(3),
        ActionNode::new(4, "EndPass", ActionFlags::END_PASS),
    ]);
    let eids: Vec<Eid> = tree.iter().map(|n| n.eid).collect();
    assert_eq!(eids, vec![1, 2, 3, 4]);
}

#[test]
fn aggregated_flags_union_descendants() {
    let tree = ActionNode::new(1, "Pass", ActionFlags::BEGIN_PASS)
        .with_children(vec![draw(2), ActionNode::new(3, "EndPass", ActionFlags::END_PASS)]);
    let agg = tree.aggregated_flags();
    assert!(agg.contains(ActionFlags::BEGIN_PASS));
    assert!(agg.contains(ActionFlags::DRAWCALL));
    assert!(agg.contains(ActionFlags::END_PASS));
    // The leaf draw itself has none of the pass markers.
    assert_eq!(tree.children[0].aggregated_flags(), ActionFlags::DRAWCALL);
}

#[test]
fn max_descendant_eid_picks_the_largest() {
    let tree = ActionNode::new(1, "Pass", ActionFlags::BEGIN_PASS)
        .with_children(vec![draw(5), draw(2)]);
    assert_eq!(tree.max_descendant_eid(), 5);
}

#[test]
fn max_descendant_eid_is_self_for_leaf() {
    let leaf = draw(7);
    assert_eq!(leaf.max_descendant_eid(), 7);
}

#[test]
fn action_tree_find_locates_nested_node() {
    let tree = ActionTree {
        roots: vec![
            ActionNode::new(1, "Pass A", ActionFlags::BEGIN_PASS).with_children(vec![draw(2)]),
            ActionNode::new(3, "Pass B", ActionFlags::BEGIN_PASS).with_children(vec![draw(4)]),
        ],
        max_eid: 4,
    };
    assert_eq!(tree.find(4).map(|n| n.eid), Some(4));
    assert!(tree.find(99).is_none());
}

#[test]
fn action_tree_iter_visits_every_root_subtree() {
    let tree = ActionTree {
        roots: vec![draw(1), draw(2), draw(3)],
        max_eid: 3,
    };
    assert_eq!(tree.iter().count(), 3);
}

#[test]
fn is_draw_and_is_dispatch_are_exclusive() {
    let d = draw(1);
    let c = ActionNode::new(2, "Dispatch", ActionFlags::DISPATCH);
    assert!(d.is_draw());
    assert!(!d.is_dispatch());
    assert!(c.is_dispatch());
    assert!(!c.is_draw());
}

#[test]
fn action_node_round_trips_through_json() {
    let node = draw(42);
    let json = serde_json::to_string(&node).unwrap();
    let back: ActionNode = serde_json::from_str(&json).unwrap();
    assert_eq!(node, back);
}
