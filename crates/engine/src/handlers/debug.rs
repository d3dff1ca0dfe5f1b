// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Native shader-debug handlers (spec §4.7, §6.4): full step traces for a
//! pixel, vertex, or compute thread.

use serde_json::{json, Value};

use rdc_core::RdcError;

use crate::handlers::support::{get_u32, require_replay_mut, resolve_eid};
use crate::state::DaemonState;

fn trace_json(trace: rdc_core::DebugTrace) -> Value {
    json!({
        "trace_handle": trace.trace_handle,
        "finished": trace.finished,
        "steps": trace.steps.into_iter().map(|s| json!({
            "step_index": s.step_index,
            "instruction": s.instruction,
            "registers": s.registers,
        })).collect::<Vec<_>>(),
    })
}

pub fn debug_pixel(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let eid = resolve_eid(params, state)?;
    let x = get_u32(params, "x").ok_or_else(|| RdcError::InvalidParams("missing `x`".to_string()))?;
    let y = get_u32(params, "y").ok_or_else(|| RdcError::InvalidParams("missing `y`".to_string()))?;
    let inputs = params.get("inputs").cloned().unwrap_or(Value::Null);
    require_replay_mut(state)?;
    let DaemonState { adapter, replay_head, .. } = state;
    let adapter = adapter.as_deref_mut().expect("checked above");
    let trace = replay_head.with_seek(adapter, eid, |a| a.debug_pixel(x, y, &inputs).map_err(RdcError::from))?;
    Ok((trace_json(trace), true))
}

pub fn debug_vertex(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let eid = resolve_eid(params, state)?;
    let vertex_id = get_u32(params, "vertex_id").unwrap_or(0);
    let instance = get_u32(params, "instance").unwrap_or(0);
    let index = get_u32(params, "index").unwrap_or(0);
    let view = get_u32(params, "view").unwrap_or(0);
    require_replay_mut(state)?;
    let DaemonState { adapter, replay_head, .. } = state;
    let adapter = adapter.as_deref_mut().expect("checked above");
    let trace = replay_head.with_seek(adapter, eid, |a| {
        a.debug_vertex(vertex_id, instance, index, view).map_err(RdcError::from)
    })?;
    Ok((trace_json(trace), true))
}

pub fn debug_thread(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let eid = resolve_eid(params, state)?;
    let group = triple(params, "group")?;
    let thread = triple(params, "thread")?;
    require_replay_mut(state)?;
    let DaemonState { adapter, replay_head, .. } = state;
    let adapter = adapter.as_deref_mut().expect("checked above");
    let trace = replay_head.with_seek(adapter, eid, |a| a.debug_thread(group, thread).map_err(RdcError::from))?;
    Ok((trace_json(trace), true))
}

fn triple(params: &Value, key: &str) -> Result<[u32; 3], RdcError> {
    let arr = params
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| RdcError::InvalidParams(format!("missing `{key}`")))?;
    if arr.len() != 3 {
        return Err(RdcError::InvalidParams(format!("`{key}` must have 3 components")));
    }
    let mut out = [0u32; 3];
    for (i, v) in arr.iter().enumerate() {
        out[i] = v
            .as_u64()
            .ok_or_else(|| RdcError::InvalidParams(format!("`{key}[{i}]` must be a non-negative integer")))? as u32;
    }
    Ok(out)
}

#[cfg(test)]
#[path = "debug_tests.rs"]
mod tests;
