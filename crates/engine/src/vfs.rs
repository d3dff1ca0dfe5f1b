// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The VFS: a path-addressable view over the capture (spec §3.5, §4.5).
//!
//! [`VfsTree`] answers `ls`/`tree` from a cache built once at capture load,
//! with per-draw subtrees (`shader/`, `bindings/`, `cbuffer/`) populated
//! lazily and evicted under an LRU cap. [`Router`] resolves a `cat`-able
//! path to the handler that produces its payload.

use std::collections::{HashMap, VecDeque};

use regex::Regex;
use rdc_adapters::ReplayAdapter;
use rdc_core::{ActionTree, Eid, RdcError, ResourceDesc};

use crate::passes::PassEntry;
use crate::replay_head::ReplayHead;
use crate::shader_cache::ShaderCache;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VfsKind {
    Dir,
    Leaf,
    LeafBin,
    Alias,
}

#[derive(Debug, Clone)]
pub struct VfsNode {
    pub kind: VfsKind,
    pub children: Vec<String>,
    /// Populated only for `Leaf`/`LeafBin` nodes: the handler method name
    /// `cat` should invoke to produce this node's payload.
    pub handler: Option<String>,
    /// Populated only for `Alias` nodes.
    pub target: Option<String>,
}

impl VfsNode {
    fn dir(children: Vec<&str>) -> Self {
        Self {
            kind: VfsKind::Dir,
            children: children.into_iter().map(String::from).collect(),
            handler: None,
            target: None,
        }
    }

    fn leaf(handler: &str) -> Self {
        Self {
            kind: VfsKind::Leaf,
            children: vec![],
            handler: Some(handler.to_string()),
            target: None,
        }
    }

    fn leaf_bin(handler: &str) -> Self {
        Self {
            kind: VfsKind::LeafBin,
            children: vec![],
            handler: Some(handler.to_string()),
            target: None,
        }
    }

    fn alias(target: &str) -> Self {
        Self {
            kind: VfsKind::Alias,
            children: vec![],
            handler: None,
            target: Some(target.to_string()),
        }
    }
}

const DRAW_DIR_CHILDREN: [&str; 9] = [
    "pipeline",
    "shader",
    "bindings",
    "cbuffer",
    "targets",
    "descriptors",
    "postvs",
    "vbuffer",
    "ibuffer",
];

const MAX_DRAW_SUBTREE_CACHE: usize = 64;

/// Adapter access passed down to `ensure_dynamic` by callers that have it
/// on hand (`ls`/`tree` handlers); `None` leaves unpopulated subtrees empty.
pub type AdapterAccess<'a> = (&'a mut dyn ReplayAdapter, &'a mut ReplayHead, &'a mut ShaderCache);

/// Lazily-populated tree cache keyed by normalized absolute path.
pub struct VfsTree {
    nodes: HashMap<String, VfsNode>,
    /// Draw eids whose `shader/`, `bindings/`, `cbuffer/` subtrees have
    /// been dynamically populated, oldest first for LRU eviction.
    populated_draws: VecDeque<Eid>,
}

impl VfsTree {
    pub fn empty() -> Self {
        Self {
            nodes: HashMap::new(),
            populated_draws: VecDeque::new(),
        }
    }

    pub fn build_static(
        tree: &ActionTree,
        passes: &[PassEntry],
        resources: &[ResourceDesc],
    ) -> Self {
        let mut nodes = HashMap::new();

        nodes.insert(
            "/".to_string(),
            VfsNode::dir(vec![
                "info", "stats", "log", "events", "draws", "passes", "resources", "textures",
                "buffers", "shaders", "counters", "current",
            ]),
        );
        nodes.insert("/info".to_string(), VfsNode::leaf("info"));
        nodes.insert("/stats".to_string(), VfsNode::leaf("stats"));
        nodes.insert("/log".to_string(), VfsNode::leaf("log"));
        nodes.insert("/resources".to_string(), VfsNode::leaf("resources"));
        nodes.insert("/shaders".to_string(), VfsNode::leaf("shaders"));
        nodes.insert("/counters".to_string(), VfsNode::leaf("counters"));
        nodes.insert("/current".to_string(), VfsNode::alias("/draws/{current_eid}"));

        let eids: Vec<Eid> = tree.iter().map(|n| n.eid).collect();
        nodes.insert(
            "/events".to_string(),
            VfsNode::dir(vec![]).with_children(eids.iter().map(|e| e.to_string()).collect()),
        );
        for &eid in &eids {
            nodes.insert(format!("/events/{eid}"), VfsNode::leaf("event"));
        }

        let draw_eids: Vec<Eid> = tree.iter().filter(|n| n.is_draw()).map(|n| n.eid).collect();
        nodes.insert(
            "/draws".to_string(),
            VfsNode::dir(vec![]).with_children(draw_eids.iter().map(|e| e.to_string()).collect()),
        );
        for &eid in &draw_eids {
            let base = format!("/draws/{eid}");
            nodes.insert(
                base.clone(),
                VfsNode::dir(DRAW_DIR_CHILDREN.to_vec()),
            );
            nodes.insert(format!("{base}/pipeline"), VfsNode::leaf("pipeline"));
            nodes.insert(format!("{base}/shader"), VfsNode::dir(vec![]));
            nodes.insert(format!("{base}/bindings"), VfsNode::dir(vec![]));
            nodes.insert(format!("{base}/cbuffer"), VfsNode::dir(vec![]));
            nodes.insert(format!("{base}/targets"), VfsNode::leaf("draw"));
            nodes.insert(format!("{base}/descriptors"), VfsNode::leaf("descriptors"));
            nodes.insert(format!("{base}/postvs"), VfsNode::leaf("postvs"));
            nodes.insert(format!("{base}/vbuffer"), VfsNode::leaf("vbuffer_decode"));
            nodes.insert(format!("{base}/ibuffer"), VfsNode::leaf("ibuffer_decode"));
        }

        nodes.insert(
            "/passes".to_string(),
            VfsNode::dir(vec![]).with_children(passes.iter().map(|p| p.name.clone()).collect()),
        );
        for pass in passes {
            let base = format!("/passes/{}", pass.name);
            nodes.insert(base.clone(), VfsNode::dir(vec!["info", "draws"]));
            nodes.insert(format!("{base}/info"), VfsNode::leaf("pass"));
            nodes.insert(format!("{base}/draws"), VfsNode::dir(vec![]));
        }

        let mut texture_ids = Vec::new();
        let mut buffer_ids = Vec::new();
        for r in resources {
            match r {
                ResourceDesc::Texture(t) => texture_ids.push(t.id.clone()),
                ResourceDesc::Buffer(b) => buffer_ids.push(b.id.clone()),
            }
        }
        nodes.insert(
            "/textures".to_string(),
            VfsNode::dir(vec![]).with_children(texture_ids.clone()),
        );
        for id in &texture_ids {
            let base = format!("/textures/{id}");
            nodes.insert(base.clone(), VfsNode::dir(vec!["info", "data", "image.png", "mips"]));
            nodes.insert(format!("{base}/info"), VfsNode::leaf("resource"));
            nodes.insert(format!("{base}/data"), VfsNode::leaf_bin("tex_raw"));
            nodes.insert(format!("{base}/image.png"), VfsNode::leaf_bin("tex_export"));
            nodes.insert(format!("{base}/mips"), VfsNode::dir(vec![]));
        }
        nodes.insert(
            "/buffers".to_string(),
            VfsNode::dir(vec![]).with_children(buffer_ids.clone()),
        );
        for id in &buffer_ids {
            let base = format!("/buffers/{id}");
            nodes.insert(base.clone(), VfsNode::dir(vec!["info", "data"]));
            nodes.insert(format!("{base}/info"), VfsNode::leaf("resource"));
            nodes.insert(format!("{base}/data"), VfsNode::leaf_bin("buf_raw"));
        }

        Self {
            nodes,
            populated_draws: VecDeque::new(),
        }
    }

    /// Resolve `/current` against the session's live cursor before lookup.
    fn normalize(&self, path: &str, current_eid: Eid) -> Result<String, RdcError> {
        if path == "/current" {
            if current_eid == 0 {
                return Err(RdcError::Precondition(
                    "current_eid is uninitialised".to_string(),
                ));
            }
            return Ok(format!("/draws/{current_eid}"));
        }
        Ok(path.trim_end_matches('/').to_string())
    }

    /// Returns kind, children, and — for `Leaf`/`LeafBin` — the handler
    /// name `cat` should invoke (spec §4.5: "client uses this to decide TTY
    /// protection policy").
    pub fn ls(
        &mut self,
        path: &str,
        current_eid: Eid,
        adapter: Option<AdapterAccess<'_>>,
    ) -> Result<(VfsKind, Vec<String>, Option<String>), RdcError> {
        let path = if path.is_empty() { "/".to_string() } else { self.normalize(path, current_eid)? };
        self.ensure_dynamic(&path, adapter)?;
        let node = self
            .nodes
            .get(&path)
            .ok_or_else(|| RdcError::NotFound(format!("path {path}")))?;
        Ok((node.kind, node.children.clone(), node.handler.clone()))
    }

    pub fn tree(
        &mut self,
        path: &str,
        depth: u32,
        current_eid: Eid,
        adapter: Option<AdapterAccess<'_>>,
    ) -> Result<serde_json::Value, RdcError> {
        if !(1..=8).contains(&depth) {
            return Err(RdcError::InvalidParams(format!(
                "depth {depth} out of range [1,8]"
            )));
        }
        let path = self.normalize(path, current_eid)?;
        self.tree_recurse(&path, depth, adapter)
    }

    fn tree_recurse(
        &mut self,
        path: &str,
        depth: u32,
        mut adapter: Option<AdapterAccess<'_>>,
    ) -> Result<serde_json::Value, RdcError> {
        self.ensure_dynamic(path, reborrow(&mut adapter))?;
        let node = self
            .nodes
            .get(path)
            .cloned()
            .ok_or_else(|| RdcError::NotFound(format!("path {path}")))?;
        let mut obj = serde_json::json!({"kind": format!("{:?}", node.kind).to_lowercase()});
        if depth > 1 && node.kind == VfsKind::Dir {
            let mut children = serde_json::Map::new();
            for name in &node.children {
                let child_path = format!("{}/{}", path.trim_end_matches('/'), name);
                children.insert(name.clone(), self.tree_recurse(&child_path, depth - 1, reborrow(&mut adapter))?);
            }
            obj["children"] = serde_json::Value::Object(children);
        }
        Ok(obj)
    }

    /// Populate `/draws/<eid>/{shader,bindings,cbuffer}` subtrees the first
    /// time they're visited, evicting the oldest populated draw beyond the
    /// LRU cap (spec §3.5, §4.5). With no adapter on hand, leaves the
    /// subtree dirs empty rather than failing the `ls`/`tree` call.
    fn ensure_dynamic(&mut self, path: &str, adapter: Option<AdapterAccess<'_>>) -> Result<(), RdcError> {
        let Some(eid) = parse_draw_subtree_eid(path) else {
            return Ok(());
        };
        if self.populated_draws.contains(&eid) {
            return Ok(());
        }
        match adapter {
            Some((adapter, head, shader_cache)) => self.populate_draw(adapter, head, shader_cache, eid),
            None => {
                self.populated_draws.push_back(eid);
                while self.populated_draws.len() > MAX_DRAW_SUBTREE_CACHE {
                    if let Some(evicted) = self.populated_draws.pop_front() {
                        self.evict_draw_subtree(evicted);
                    }
                }
                Ok(())
            }
        }
    }

    fn evict_draw_subtree(&mut self, eid: Eid) {
        let base = format!("/draws/{eid}");
        self.nodes.insert(format!("{base}/shader"), VfsNode::dir(vec![]));
        self.nodes.insert(format!("{base}/bindings"), VfsNode::dir(vec![]));
        self.nodes.insert(format!("{base}/cbuffer"), VfsNode::dir(vec![]));
    }

    /// Query the adapter for a draw's active stages/sets and materialize
    /// the dynamic subtree nodes (spec §4.5). Idempotent per eid.
    pub fn populate_draw(
        &mut self,
        adapter: &mut dyn ReplayAdapter,
        head: &mut ReplayHead,
        _shader_cache: &mut ShaderCache,
        eid: Eid,
    ) -> Result<(), RdcError> {
        let state = head.with_seek(adapter, eid, |a| a.pipeline_state().map_err(RdcError::from))?;
        let base = format!("/draws/{eid}");

        let stages: Vec<String> = state.shaders.iter().map(|s| s.stage.clone()).collect();
        self.nodes.insert(
            format!("{base}/shader"),
            VfsNode::dir(vec![]).with_children(stages.clone()),
        );
        for stage in &stages {
            self.nodes
                .insert(format!("{base}/shader/{stage}"), VfsNode::leaf("shader"));
        }

        let sets: Vec<String> = state
            .descriptors
            .iter()
            .map(|d| d.set.to_string())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();
        self.nodes.insert(
            format!("{base}/bindings"),
            VfsNode::dir(vec![]).with_children(sets.clone()),
        );
        self.nodes.insert(
            format!("{base}/cbuffer"),
            VfsNode::dir(vec![]).with_children(sets.clone()),
        );
        for set in &sets {
            self.nodes
                .insert(format!("{base}/bindings/{set}"), VfsNode::leaf("bindings"));
            self.nodes
                .insert(format!("{base}/cbuffer/{set}"), VfsNode::leaf("cbuffer_decode"));
        }

        if !self.populated_draws.contains(&eid) {
            self.populated_draws.push_back(eid);
        }
        while self.populated_draws.len() > MAX_DRAW_SUBTREE_CACHE {
            if let Some(evicted) = self.populated_draws.pop_front() {
                self.evict_draw_subtree(evicted);
            }
        }
        Ok(())
    }
}

impl VfsNode {
    fn with_children(mut self, children: Vec<String>) -> Self {
        self.children = children;
        self
    }
}

/// Reborrow an `Option<AdapterAccess>` for a nested call without moving it.
fn reborrow<'a, 'b: 'a>(adapter: &'a mut Option<AdapterAccess<'b>>) -> Option<AdapterAccess<'a>> {
    adapter.as_mut().map(|(a, h, c)| (&mut **a as &mut dyn ReplayAdapter, &mut **h, &mut **c))
}

fn parse_draw_subtree_eid(path: &str) -> Option<Eid> {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^/draws/(\d+)/(shader|bindings|cbuffer)(/.*)?$").unwrap());
    re.captures(path)?.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
#[path = "vfs_tests.rs"]
mod tests;
