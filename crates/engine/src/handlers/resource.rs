// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource inventory and binary-export handlers (spec §4.7, §4.8, §6.4).
//! Binary results never cross the wire: handlers write to a unique path
//! under the session temp directory and return `{path, size}`.

use std::path::PathBuf;

use serde_json::{json, Value};

use rdc_adapters::{TextureExportFormat, TextureExportSpec};
use rdc_core::{RdcError, ResourceDesc};

use crate::handlers::support::{byte_size_json as render_size, get_u32, require_replay, resolve_eid};
use crate::state::DaemonState;

fn resource_json(r: &ResourceDesc) -> Value {
    match r {
        ResourceDesc::Texture(t) => json!({
            "kind": "texture", "id": t.id, "name": t.name, "width": t.width, "height": t.height,
            "depth": t.depth, "mips": t.mips, "array_size": t.array_size, "format": t.format,
            "byte_size": render_size(t.byte_size),
        }),
        ResourceDesc::Buffer(b) => json!({
            "kind": "buffer", "id": b.id, "name": b.name, "length": render_size(b.length),
        }),
    }
}

pub fn resources(_params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let adapter = require_replay(state)?;
    let rows: Vec<Value> = adapter.resources().iter().map(resource_json).collect();
    Ok((json!({"resources": rows}), true))
}

pub fn resource(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let id = crate::handlers::support::require_str(params, "id")?;
    let adapter = require_replay(state)?;
    let found = adapter
        .resources()
        .into_iter()
        .find(|r| match r {
            ResourceDesc::Texture(t) => t.id == id,
            ResourceDesc::Buffer(b) => b.id == id,
        })
        .ok_or_else(|| RdcError::NotFound(format!("resource {id}")))?;
    Ok((resource_json(&found), true))
}

pub fn tex_info(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    resource(params, state)
}

pub fn buf_info(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    resource(params, state)
}

fn temp_path(state: &DaemonState, prefix: &str, ext: &str) -> Result<PathBuf, RdcError> {
    let dir = state
        .temp_dir
        .as_ref()
        .ok_or_else(|| RdcError::Precondition("no session temp directory".to_string()))?;
    Ok(dir.join(format!("{prefix}.{ext}")))
}

pub fn tex_export(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let id = crate::handlers::support::require_str(params, "id")?.to_string();
    let mip = get_u32(params, "mip").unwrap_or(0);
    let slice = get_u32(params, "slice").unwrap_or(0);
    let path = temp_path(state, &format!("tex-{id}-mip{mip}-slice{slice}"), "png")?;
    let adapter = require_replay(state)?;
    let spec = TextureExportSpec {
        resource_id: id.clone(),
        mip,
        slice,
        format: TextureExportFormat::Png,
    };
    let size = adapter.save_texture(&spec, &path)?;
    Ok((json!({"path": path.to_string_lossy(), "size": size, "id": id}), true))
}

pub fn tex_raw(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let id = crate::handlers::support::require_str(params, "id")?.to_string();
    let mip = get_u32(params, "mip").unwrap_or(0);
    let path = temp_path(state, &format!("tex-{id}-mip{mip}-raw"), "bin")?;
    let adapter = require_replay(state)?;
    let data = adapter.get_texture_data(&id, mip)?;
    std::fs::write(&path, &data).map_err(|e| RdcError::Internal(e.to_string()))?;
    Ok((json!({"path": path.to_string_lossy(), "size": data.len(), "id": id}), true))
}

fn rt_export_impl(params: &Value, state: &mut DaemonState, slot_kind: &str) -> Result<(Value, bool), RdcError> {
    let eid = resolve_eid(params, state)?;
    crate::handlers::support::require_replay_mut(state)?;
    let ps = {
        let DaemonState { adapter, replay_head, .. } = state;
        let adapter = adapter.as_deref_mut().expect("checked above");
        replay_head.with_seek(adapter, eid, |a| a.pipeline_state().map_err(RdcError::from))?
    };
    let target = match slot_kind {
        "depth" => ps
            .depth_target
            .as_ref()
            .ok_or_else(|| RdcError::Precondition("no depth target bound".to_string()))?,
        _ => ps
            .output_targets
            .first()
            .ok_or_else(|| RdcError::Precondition("no output targets bound".to_string()))?,
    };
    let resource_id = target.resource_id.clone();
    let path = temp_path(state, &format!("rt-{slot_kind}-{eid}"), "png")?;
    let adapter = require_replay(state)?;
    let spec = TextureExportSpec {
        resource_id: resource_id.clone(),
        mip: 0,
        slice: 0,
        format: TextureExportFormat::Png,
    };
    let size = adapter.save_texture(&spec, &path)?;
    Ok((json!({"path": path.to_string_lossy(), "size": size, "resource_id": resource_id}), true))
}

pub fn rt_export(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    rt_export_impl(params, state, "color")
}

pub fn rt_depth(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    rt_export_impl(params, state, "depth")
}

pub fn rt_overlay(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let eid = resolve_eid(params, state)?;
    let output = state
        .adapter_mut()
        .ok_or_else(|| RdcError::Precondition("no replay loaded".to_string()))?
        .create_output("headless", "overlay")?;
    let adapter = state.adapter_mut().expect("checked above");
    let tex_id = adapter.get_debug_overlay_tex_id(&output)?;
    let path = temp_path(state, &format!("rt-overlay-{eid}"), "png")?;
    let adapter = require_replay(state)?;
    let spec = TextureExportSpec {
        resource_id: tex_id.clone(),
        mip: 0,
        slice: 0,
        format: TextureExportFormat::Png,
    };
    let size = adapter.save_texture(&spec, &path)?;
    Ok((json!({"path": path.to_string_lossy(), "size": size, "resource_id": tex_id}), true))
}

pub fn buf_raw(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let id = crate::handlers::support::require_str(params, "id")?.to_string();
    let offset = get_u32(params, "offset").unwrap_or(0) as u64;
    let length = get_u32(params, "length").unwrap_or(u32::MAX) as u64;
    let path = temp_path(state, &format!("buf-{id}-{offset}"), "bin")?;
    let adapter = require_replay(state)?;
    let data = adapter.get_buffer_data(&id, offset, length)?;
    std::fs::write(&path, &data).map_err(|e| RdcError::Internal(e.to_string()))?;
    Ok((json!({"path": path.to_string_lossy(), "size": data.len(), "id": id}), true))
}

pub fn usage(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let id = crate::handlers::support::require_str(params, "id")?;
    crate::handlers::support::require_replay(state)?;
    let draw_eids: Vec<rdc_core::Eid> = state
        .root_actions
        .iter()
        .filter(|n| n.is_draw())
        .map(|n| n.eid)
        .collect();
    if !state.shader_cache.is_built() {
        let DaemonState { adapter, replay_head, shader_cache, .. } = state;
        let adapter = adapter.as_deref_mut().expect("checked above");
        shader_cache.build(adapter, replay_head, &draw_eids)?;
    }
    let DaemonState { adapter, replay_head, .. } = state;
    let adapter = adapter.as_deref_mut().expect("checked above");
    let used: Vec<rdc_core::Eid> = draw_eids
        .into_iter()
        .filter(|&eid| {
            replay_head
                .with_seek(adapter, eid, |a| a.pipeline_state().map_err(RdcError::from))
                .map(|ps| {
                    ps.descriptors.iter().any(|d| d.resource_id.as_deref() == Some(id))
                        || ps.vertex_buffers.iter().any(|v| v.resource_id == id)
                        || ps.index_buffer.as_ref().map(|b| b.resource_id == id).unwrap_or(false)
                        || ps.output_targets.iter().any(|t| t.resource_id == id)
                        || ps.depth_target.as_ref().map(|t| t.resource_id == id).unwrap_or(false)
                })
                .unwrap_or(false)
        })
        .collect();
    Ok((json!({"id": id, "used_by_draws": used}), true))
}

pub fn counters(_params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let adapter = require_replay(state)?;
    let rows: Vec<Value> = adapter
        .counters()
        .into_iter()
        .map(|c| json!({"uuid": c.uuid, "name": c.name, "description": c.description, "unit": c.unit}))
        .collect();
    Ok((json!({"counters": rows}), true))
}

pub fn counter_list(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    counters(params, state)
}

pub fn fetch_counters(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let eids: Vec<rdc_core::Eid> = params
        .get("eids")
        .and_then(Value::as_array)
        .map(|a| a.iter().filter_map(Value::as_u64).map(|v| v as u32).collect())
        .unwrap_or_default();
    let uuids: Vec<String> = params
        .get("uuids")
        .and_then(Value::as_array)
        .map(|a| a.iter().filter_map(Value::as_str).map(String::from).collect())
        .unwrap_or_default();
    let adapter = require_replay(state)?;
    let rows = adapter.fetch_counters(&eids, &uuids)?;
    Ok((
        json!({"results": rows.into_iter().map(|r| json!({"eid": r.eid, "uuid": r.uuid, "value": r.value})).collect::<Vec<_>>()}),
        true,
    ))
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
