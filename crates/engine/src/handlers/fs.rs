// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `vfs_ls` / `vfs_tree` handlers (spec §4.5, §4.7).

use serde_json::{json, Value};

use rdc_core::RdcError;

use crate::handlers::support::{get_u32, require_str};
use crate::state::DaemonState;

pub fn vfs_ls(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let path = require_str(params, "path")?;
    let current_eid = state.replay_head.current_eid;
    let DaemonState { vfs_tree, adapter, replay_head, shader_cache, .. } = state;
    let adapter = adapter.as_deref_mut().map(|a| (a, replay_head, shader_cache));
    let (kind, children, handler) = vfs_tree.ls(path, current_eid, adapter)?;
    Ok((
        json!({"kind": format!("{:?}", kind).to_lowercase(), "children": children, "handler": handler}),
        true,
    ))
}

pub fn vfs_tree(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let path = require_str(params, "path")?;
    let depth = get_u32(params, "depth").unwrap_or(1);
    let current_eid = state.replay_head.current_eid;
    let DaemonState { vfs_tree, adapter, replay_head, shader_cache, .. } = state;
    let adapter = adapter.as_deref_mut().map(|a| (a, replay_head, shader_cache));
    let tree = vfs_tree.tree(path, depth, current_eid, adapter)?;
    Ok((tree, true))
}

#[cfg(test)]
#[path = "fs_tests.rs"]
mod tests;
