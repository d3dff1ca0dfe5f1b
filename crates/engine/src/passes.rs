// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pass detection (spec §4.6): distinguishes true render passes from
//! container nodes whose flags merely aggregate BeginPass and EndPass from
//! their descendants, and synthesises friendly names for unmarked passes.

use regex::Regex;
use std::sync::OnceLock;

use rdc_core::{ActionFlags, ActionNode, Eid};

#[derive(Debug, Clone, PartialEq)]
pub struct PassEntry {
    pub name: String,
    pub begin_eid: Eid,
    pub end_eid: Eid,
    pub draws: u32,
    pub dispatches: u32,
    pub triangles: u64,
}

/// Walk the action tree and return one entry per detected render pass, in
/// traversal order.
pub fn detect_passes(tree: &rdc_core::ActionTree) -> Vec<PassEntry> {
    let mut passes = Vec::new();
    let mut index = 0u32;
    for root in &tree.roots {
        classify(root, &mut passes, &mut index);
    }
    passes
}

fn classify(node: &ActionNode, out: &mut Vec<PassEntry>, index: &mut u32) {
    let has_begin = node.flags.contains(ActionFlags::BEGIN_PASS);
    let has_end = node.flags.contains(ActionFlags::END_PASS);

    if has_begin && !has_end {
        // A genuine render pass. A named group among the direct children
        // (one containing draws) becomes its own pass entry per group;
        // otherwise the render pass itself is the single entry.
        let groups: Vec<&ActionNode> = node
            .children
            .iter()
            .filter(|c| c.children.iter().any(|n| n.is_draw() || n.is_dispatch()))
            .collect();

        if !groups.is_empty() {
            for group in groups {
                out.push(build_entry(group.name.clone(), node.eid, group));
                *index += 1;
            }
        } else {
            let name = friendly_name(&node.name, *index + 1);
            out.push(build_entry(name, node.eid, node));
            *index += 1;
        }
        return;
    }

    if has_begin && has_end {
        // Container: its own flags already aggregate a BeginPass/EndPass
        // pair from descendants. Not a pass itself; recurse into children.
        for child in &node.children {
            classify(child, out, index);
        }
        return;
    }

    for child in &node.children {
        classify(child, out, index);
    }
}

fn build_entry(name: String, begin_eid: Eid, scope: &ActionNode) -> PassEntry {
    let mut draws = 0u32;
    let mut dispatches = 0u32;
    let mut triangles = 0u64;
    let mut max_draw_eid = begin_eid;
    for n in scope.iter() {
        if n.is_draw() {
            draws += 1;
            triangles += n.triangle_estimate.unwrap_or(0);
            max_draw_eid = max_draw_eid.max(n.eid);
        }
        if n.is_dispatch() {
            dispatches += 1;
            max_draw_eid = max_draw_eid.max(n.eid);
        }
    }
    PassEntry {
        name,
        begin_eid,
        end_eid: max_draw_eid,
        draws,
        dispatches,
        triangles,
    }
}

fn attachment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"C=[A-Za-z]+").unwrap())
}

fn depth_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"D=[A-Za-z]+").unwrap())
}

fn suffix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(([^)]*)\)\s*$").unwrap())
}

/// Friendly-name synthesis for a render pass lacking a named draw group
/// (spec §4.6): count color (`C=`) attachments, note depth (`D=`)
/// presence, and fall back to a parenthesised API-name suffix if present.
fn friendly_name(api_name: &str, index: u32) -> String {
    let color_count = attachment_regex().find_iter(api_name).count();
    let has_depth = depth_regex().is_match(api_name);

    if color_count > 0 || has_depth {
        let targets = if color_count == 1 {
            "1 Target".to_string()
        } else {
            format!("{color_count} Targets")
        };
        let depth_suffix = if has_depth { " + Depth" } else { "" };
        return format!("Colour Pass #{index} ({targets}{depth_suffix})");
    }

    if let Some(caps) = suffix_regex().captures(api_name) {
        return format!("Colour Pass #{index} ({})", &caps[1]);
    }

    format!("Colour Pass #{index}")
}

#[cfg(test)]
#[path = "passes_tests.rs"]
mod tests;
