// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Decoded vertex/index/mesh/constant-buffer handlers (spec §4.7, §6.4).

use serde_json::{json, Value};

use rdc_core::RdcError;

use crate::handlers::shader::flatten_constants;
use crate::handlers::support::{get_u32, require_replay_mut, resolve_eid};
use crate::state::DaemonState;

fn rows_json(rows: Vec<rdc_adapters::DecodedRow>) -> Value {
    json!(rows.into_iter().map(|r| r.columns).collect::<Vec<_>>())
}

pub fn postvs(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let eid = resolve_eid(params, state)?;
    let stream = get_u32(params, "stream").unwrap_or(0);
    require_replay_mut(state)?;
    let DaemonState { adapter, replay_head, .. } = state;
    let adapter = adapter.as_deref_mut().expect("checked above");
    let rows = replay_head.with_seek(adapter, eid, |a| a.postvs(stream).map_err(RdcError::from))?;
    Ok((json!({"eid": eid, "rows": rows_json(rows)}), true))
}

pub fn vbuffer_decode(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let eid = resolve_eid(params, state)?;
    let stream = get_u32(params, "stream").unwrap_or(0);
    require_replay_mut(state)?;
    let DaemonState { adapter, replay_head, .. } = state;
    let adapter = adapter.as_deref_mut().expect("checked above");
    let rows = replay_head.with_seek(adapter, eid, |a| a.vbuffer_decode(stream).map_err(RdcError::from))?;
    Ok((json!({"eid": eid, "rows": rows_json(rows)}), true))
}

pub fn ibuffer_decode(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let eid = resolve_eid(params, state)?;
    require_replay_mut(state)?;
    let DaemonState { adapter, replay_head, .. } = state;
    let adapter = adapter.as_deref_mut().expect("checked above");
    let rows = replay_head.with_seek(adapter, eid, |a| a.ibuffer_decode().map_err(RdcError::from))?;
    Ok((json!({"eid": eid, "rows": rows_json(rows)}), true))
}

pub fn mesh_data(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let eid = resolve_eid(params, state)?;
    let stream = get_u32(params, "stream").unwrap_or(0);
    require_replay_mut(state)?;
    let DaemonState { adapter, replay_head, .. } = state;
    let adapter = adapter.as_deref_mut().expect("checked above");
    let rows = replay_head.with_seek(adapter, eid, |a| a.mesh_data(stream).map_err(RdcError::from))?;
    Ok((json!({"eid": eid, "rows": rows_json(rows)}), true))
}

pub fn cbuffer_decode(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let eid = resolve_eid(params, state)?;
    let stage = crate::handlers::support::require_str(params, "stage")?.to_string();
    let set = get_u32(params, "set").unwrap_or(0);
    let binding = get_u32(params, "binding").unwrap_or(0);

    require_replay_mut(state)?;
    let ps = {
        let DaemonState { adapter, replay_head, .. } = state;
        let adapter = adapter.as_deref_mut().expect("checked above");
        replay_head.with_seek(adapter, eid, |a| a.pipeline_state().map_err(RdcError::from))?
    };
    let descriptor = ps
        .descriptors
        .iter()
        .find(|d| d.stage.eq_ignore_ascii_case(&stage) && d.set == set && d.binding == binding)
        .ok_or_else(|| RdcError::NotFound(format!("no descriptor at set {set} binding {binding}")))?;
    let resource_id = descriptor
        .resource_id
        .clone()
        .ok_or_else(|| RdcError::Precondition("descriptor has no bound resource".to_string()))?;
    let shader_id = ps
        .shaders
        .iter()
        .find(|s| s.stage.eq_ignore_ascii_case(&stage))
        .map(|s| s.shader_id.clone())
        .ok_or_else(|| RdcError::NotFound(format!("no shader bound at stage {stage}")))?;

    let contents = {
        let DaemonState { adapter, replay_head, .. } = state;
        let adapter = adapter.as_deref_mut().expect("checked above");
        replay_head.with_seek(adapter, eid, |a| {
            a.get_cbuffer_variable_contents(&shader_id, &stage, binding, &resource_id, 0, 0)
                .map_err(RdcError::from)
        })?
    };
    let vars = flatten_constants(&contents, "", 0);
    Ok((json!({"eid": eid, "stage": stage, "set": set, "binding": binding, "variables": vars}), true))
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
