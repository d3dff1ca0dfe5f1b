// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The action tree: an immutable record of the capture's command stream.
//!
//! One [`ActionNode`] per recorded GPU command (draw, dispatch, clear, copy,
//! marker, pass begin/end). Traversal is depth-first, EID-ordered.

use serde::{Deserialize, Serialize};

/// An event id. Monotonic and dense within a capture; `0` is the
/// uninitialised "nothing selected" sentinel (see [`crate::session_descriptor`]).
pub type Eid = u32;

bitflags::bitflags! {
    /// Bitset of action kinds, mirroring the adapter's native flag set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ActionFlags: u32 {
        const BEGIN_PASS = 1 << 0;
        const END_PASS   = 1 << 1;
        const DRAWCALL   = 1 << 2;
        const DISPATCH   = 1 << 3;
        const CLEAR      = 1 << 4;
        const COPY       = 1 << 5;
        const MARKER     = 1 << 6;
        const RESOLVE    = 1 << 7;
    }
}

/// One node in the action tree (see §3.3).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionNode {
    pub eid: Eid,
    pub name: String,
    pub flags: ActionFlags,
    pub children: Vec<ActionNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triangle_estimate: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_count: Option<u32>,
}

impl ActionNode {
    pub fn new(eid: Eid, name: impl Into<String>, flags: ActionFlags) -> Self {
        Self {
            eid,
            name: name.into(),
            flags,
            children: Vec::new(),
            pass_name: None,
            triangle_estimate: None,
            instance_count: None,
        }
    }

    pub fn with_children(mut self, children: Vec<ActionNode>) -> Self {
        self.children = children;
        self
    }

    pub fn is_draw(&self) -> bool {
        self.flags.contains(ActionFlags::DRAWCALL)
    }

    pub fn is_dispatch(&self) -> bool {
        self.flags.contains(ActionFlags::DISPATCH)
    }

    /// Aggregated flags across this node and all descendants (used by pass
    /// detection to tell a container node from a genuine render pass; see
    /// `rdc_engine::passes`).
    pub fn aggregated_flags(&self) -> ActionFlags {
        let mut acc = self.flags;
        for child in &self.children {
            acc |= child.aggregated_flags();
        }
        acc
    }

    /// Depth-first, EID-ordered iterator over this node and all descendants.
    pub fn iter(&self) -> ActionIter<'_> {
        ActionIter { stack: vec![self] }
    }

    /// The maximum EID among this node and all descendants.
    pub fn max_descendant_eid(&self) -> Eid {
        self.iter().map(|n| n.eid).max().unwrap_or(self.eid)
    }
}

/// Depth-first, EID-ordered traversal over an action tree.
pub struct ActionIter<'a> {
    stack: Vec<&'a ActionNode>,
}

impl<'a> Iterator for ActionIter<'a> {
    type Item = &'a ActionNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children in reverse so iteration stays EID-ordered with a stack.
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}

/// Root of an action tree plus the derived maximum EID, as handed back by
/// [`rdc_adapters::ReplayAdapter::root_actions`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionTree {
    pub roots: Vec<ActionNode>,
    pub max_eid: Eid,
}

impl ActionTree {
    /// Depth-first, EID-ordered iterator across all root subtrees.
    pub fn iter(&self) -> impl Iterator<Item = &ActionNode> {
        self.roots.iter().flat_map(|r| r.iter())
    }

    /// Find a node by EID.
    pub fn find(&self, eid: Eid) -> Option<&ActionNode> {
        self.iter().find(|n| n.eid == eid)
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
