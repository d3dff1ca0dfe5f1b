// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline-state and descriptor-binding handlers (spec §4.7, §6.4): the
//! `pipeline`/`pipe_*` family exposes one fixed-function section at a time,
//! `bindings`/`descriptors` expose the used-resource table.

use serde_json::{json, Value};

use rdc_core::RdcError;

use crate::handlers::support::{get_str, get_u32, require_replay_mut, resolve_eid};
use crate::state::DaemonState;

// `state.adapter` and `state.replay_head` are both borrowed mutably here;
// split the borrow explicitly rather than going through a single accessor.
fn snapshot_split(params: &Value, state: &mut DaemonState) -> Result<rdc_core::PipelineState, RdcError> {
    let eid = resolve_eid(params, state)?;
    crate::handlers::support::check_eid_range(eid, state)?;
    require_replay_mut(state)?;
    let DaemonState { adapter, replay_head, .. } = state;
    let adapter = adapter.as_deref_mut().expect("checked by require_replay_mut above");
    replay_head.with_seek(adapter, eid, |a| a.pipeline_state().map_err(RdcError::from))
}

pub fn pipeline(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let ps = snapshot_split(params, state)?;
    if let Some(section) = get_str(params, "section") {
        let detail = section_detail(&ps, section)?;
        return Ok((json!({"eid": ps.eid, "section": section, "detail": detail}), true));
    }
    Ok((
        json!({"eid": ps.eid, "primitive_topology": ps.primitive_topology}),
        true,
    ))
}

fn section_detail(ps: &rdc_core::PipelineState, section: &str) -> Result<Value, RdcError> {
    match section {
        "topology" => Ok(json!(ps.primitive_topology)),
        "viewport" => Ok(json!(ps.viewports)),
        "scissor" => Ok(json!(ps.scissors)),
        "blend" => Ok(json!(ps.color_blends)),
        "vinputs" => Ok(json!(ps.vertex_inputs)),
        "samplers" => Ok(json!(ps.samplers)),
        "vbuffers" => Ok(json!(ps.vertex_buffers)),
        "ibuffer" => Ok(json!(ps.index_buffer)),
        "push_constants" => Ok(json!(ps.push_constants)),
        "rasterizer" => Ok(json!(ps.rasterizer)),
        "depth_stencil" => Ok(json!(ps.depth_stencil)),
        "msaa" => Ok(json!(ps.msaa)),
        other => Err(RdcError::InvalidParams(format!("unknown pipeline section `{other}`"))),
    }
}

macro_rules! pipe_section_handler {
    ($fn_name:ident, $section:literal) => {
        pub fn $fn_name(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
            let ps = snapshot_split(params, state)?;
            Ok((json!({"eid": ps.eid, "value": section_detail(&ps, $section)?}), true))
        }
    };
}

pipe_section_handler!(pipe_topology, "topology");
pipe_section_handler!(pipe_viewport, "viewport");
pipe_section_handler!(pipe_scissor, "scissor");
pipe_section_handler!(pipe_blend, "blend");
pipe_section_handler!(pipe_vinputs, "vinputs");
pipe_section_handler!(pipe_samplers, "samplers");
pipe_section_handler!(pipe_vbuffers, "vbuffers");
pipe_section_handler!(pipe_ibuffer, "ibuffer");
pipe_section_handler!(pipe_push_constants, "push_constants");
pipe_section_handler!(pipe_rasterizer, "rasterizer");
pipe_section_handler!(pipe_depth_stencil, "depth_stencil");
pipe_section_handler!(pipe_msaa, "msaa");

/// `pipe_stencil` reports both stencil faces; it isn't a plain pass-through
/// of `depth_stencil` since callers want just the stencil sub-fields.
pub fn pipe_stencil(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let ps = snapshot_split(params, state)?;
    let ds = ps
        .depth_stencil
        .as_ref()
        .ok_or_else(|| RdcError::Precondition("no depth/stencil state bound".to_string()))?;
    Ok((
        json!({"eid": ps.eid, "enabled": ds.stencil_enable, "front": ds.front, "back": ds.back}),
        true,
    ))
}

pub fn bindings(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let ps = snapshot_split(params, state)?;
    let binding_filter = get_u32(params, "binding");
    let rows: Vec<Value> = ps
        .descriptors
        .iter()
        .filter(|d| binding_filter.map(|b| d.binding == b).unwrap_or(true))
        .map(|d| {
            json!({
                "stage": d.stage, "set": d.set, "binding": d.binding, "access": d.access,
                "resource_id": d.resource_id, "sampler_id": d.sampler_id,
            })
        })
        .collect();
    Ok((json!({"eid": ps.eid, "bindings": rows}), true))
}

pub fn descriptors(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let ps = snapshot_split(params, state)?;
    let rows: Vec<Value> = ps
        .descriptors
        .iter()
        .map(|d| {
            json!({
                "stage": d.stage, "set": d.set, "binding": d.binding, "access": d.access,
                "resource_id": d.resource_id, "sampler_id": d.sampler_id,
            })
        })
        .collect();
    Ok((json!({"eid": ps.eid, "descriptors": rows}), true))
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
