// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shader inventory, reflection, and disassembly handlers (spec §4.7, §6.4).

use serde_json::{json, Value};

use rdc_core::RdcError;

use crate::handlers::support::{require_str, resolve_eid};
use crate::state::DaemonState;

/// Seek to `eid` and snapshot its pipeline state, restoring the replay
/// head's position afterward (spec §4.4: read-only queries don't move it).
fn pipeline_state_at(state: &mut DaemonState, eid: rdc_core::Eid) -> Result<rdc_core::PipelineState, RdcError> {
    crate::handlers::support::require_replay_mut(state)?;
    let DaemonState { adapter, replay_head, .. } = state;
    let adapter = adapter.as_deref_mut().expect("checked above");
    replay_head.with_seek(adapter, eid, |a| a.pipeline_state().map_err(RdcError::from))
}

pub fn shader(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let eid = resolve_eid(params, state)?;
    let stage = require_str(params, "stage")?;
    let ps = pipeline_state_at(state, eid)?;
    let shader = ps
        .shaders
        .iter()
        .find(|s| s.stage.eq_ignore_ascii_case(stage))
        .ok_or_else(|| RdcError::NotFound(format!("no shader bound at stage {stage}")))?;
    Ok((
        json!({"eid": eid, "stage": shader.stage, "shader_id": shader.shader_id, "entry_point": shader.entry_point}),
        true,
    ))
}

pub fn shaders(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let adapter = crate::handlers::support::require_replay(state)?;
    let stage_filter = crate::handlers::support::get_str(params, "stage");
    let rows: Vec<Value> = adapter
        .shaders()
        .into_iter()
        .filter(|s| {
            stage_filter
                .map(|f| s.stage.to_ascii_lowercase().contains(&f.to_ascii_lowercase()))
                .unwrap_or(true)
        })
        .map(|s| {
            json!({
                "id": s.id, "stages": s.stage, "entry_point": s.entry_point,
                "used_by_draws": s.used_by_draws.len(),
            })
        })
        .collect();
    Ok((json!({"shaders": rows}), true))
}

pub fn shader_map(_params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    crate::handlers::support::require_replay(state)?;
    let draw_eids: Vec<rdc_core::Eid> = state
        .root_actions
        .iter()
        .filter(|n| n.is_draw())
        .map(|n| n.eid)
        .collect();
    if !state.shader_cache.is_built() {
        let DaemonState {
            adapter,
            replay_head,
            shader_cache,
            ..
        } = state;
        let adapter = adapter.as_deref_mut().expect("checked above");
        shader_cache.build(adapter, replay_head, &draw_eids)?;
    }
    let rows: Vec<Value> = draw_eids
        .iter()
        .filter_map(|&eid| state.shader_cache.get(eid).map(|s| (eid, s)))
        .map(|(eid, shaders)| json!({"eid": eid, "shaders": shaders.stages}))
        .collect();
    Ok((json!({"draws": rows}), true))
}

pub fn shader_all(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let eid = resolve_eid(params, state)?;
    let ps = pipeline_state_at(state, eid)?;
    let stages: Vec<Value> = ps
        .shaders
        .iter()
        .map(|s| json!({"stage": s.stage, "shader_id": s.shader_id}))
        .collect();
    Ok((json!({"eid": eid, "stages": stages}), true))
}

pub fn shader_targets(_params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let adapter = crate::handlers::support::require_replay(state)?;
    Ok((json!({"targets": adapter.shader_targets()}), true))
}

pub fn shader_reflect(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let eid = resolve_eid(params, state)?;
    let stage = require_str(params, "stage")?;
    let ps = pipeline_state_at(state, eid)?;
    let shader = ps
        .shaders
        .iter()
        .find(|s| s.stage.eq_ignore_ascii_case(stage))
        .ok_or_else(|| RdcError::NotFound(format!("no shader bound at stage {stage}")))?;
    let adapter = crate::handlers::support::require_replay(state)?;
    let refl = adapter.shader_reflect(&shader.shader_id)?;
    Ok((
        json!({"inputs": refl.inputs, "outputs": refl.outputs, "constant_blocks": refl.constant_blocks}),
        true,
    ))
}

pub fn shader_source(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let eid = resolve_eid(params, state)?;
    let stage = require_str(params, "stage")?;
    let ps = pipeline_state_at(state, eid)?;
    let shader = ps
        .shaders
        .iter()
        .find(|s| s.stage.eq_ignore_ascii_case(stage))
        .ok_or_else(|| RdcError::NotFound(format!("no shader bound at stage {stage}")))?;
    let adapter = crate::handlers::support::require_replay(state)?;
    let src = adapter.shader_source(&shader.shader_id)?;
    Ok((
        json!({
            "source_files": src.source_files,
            "disassembly": src.disassembly,
            "has_debug_info": src.has_debug_info,
        }),
        true,
    ))
}

/// Recurse up to 8 levels into a constant-variable tree, flattening deeper
/// members onto dot-path names (spec §8 boundary behaviors).
pub fn flatten_constants(vars: &[rdc_core::ConstantVar], prefix: &str, depth: u32) -> Vec<Value> {
    vars.iter()
        .flat_map(|v| {
            let path = if prefix.is_empty() {
                v.name.clone()
            } else {
                format!("{prefix}.{}", v.name)
            };
            match &v.members {
                Some(members) if depth < 8 => flatten_constants(members, &path, depth + 1),
                Some(members) => members
                    .iter()
                    .map(|m| json!({"name": format!("{path}.{}", m.name), "type": m.ty, "value": m.value}))
                    .collect(),
                None => vec![json!({"name": path, "type": v.ty, "rows": v.rows, "cols": v.cols, "value": v.value})],
            }
        })
        .collect()
}

pub fn shader_constants(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let eid = resolve_eid(params, state)?;
    let stage = require_str(params, "stage")?;
    let ps = pipeline_state_at(state, eid)?;
    let shader = ps
        .shaders
        .iter()
        .find(|s| s.stage.eq_ignore_ascii_case(stage))
        .ok_or_else(|| RdcError::NotFound(format!("no shader bound at stage {stage}")))?
        .clone();
    let adapter = crate::handlers::support::require_replay(state)?;
    let refl = adapter.shader_reflect(&shader.shader_id)?;
    let mut vars = Vec::new();
    for (i, block) in refl.constant_blocks.iter().enumerate() {
        let contents = {
            crate::handlers::support::require_replay_mut(state)?;
            let DaemonState { adapter, replay_head, .. } = state;
            let adapter = adapter.as_deref_mut().expect("checked above");
            replay_head.with_seek(adapter, eid, |a| {
                a.get_cbuffer_variable_contents(&shader.shader_id, stage, i as u32, block, 0, 0)
                    .map_err(RdcError::from)
            })?
        };
        vars.extend(flatten_constants(&contents, block, 0));
    }
    Ok((json!({"eid": eid, "stage": stage, "variables": vars}), true))
}

pub fn shader_disasm(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let eid = resolve_eid(params, state)?;
    let stage = require_str(params, "stage")?;
    let target = require_str(params, "target")?;
    let ps = pipeline_state_at(state, eid)?;
    let shader = ps
        .shaders
        .iter()
        .find(|s| s.stage.eq_ignore_ascii_case(stage))
        .ok_or_else(|| RdcError::NotFound(format!("no shader bound at stage {stage}")))?;
    let adapter = crate::handlers::support::require_replay(state)?;
    let text = adapter.disassemble_shader(&shader.shader_id, target)?;
    Ok((json!({"eid": eid, "stage": stage, "target": target, "disassembly": text}), true))
}

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;
