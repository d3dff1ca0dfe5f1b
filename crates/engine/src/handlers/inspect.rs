// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capture/event/draw inspection handlers (spec §4.7, §6.4).

use serde_json::{json, Value};

use rdc_core::{ActionFlags, Eid, RdcError};

use crate::handlers::support::{check_eid_range, get_str, get_u32, require_replay};
use crate::state::DaemonState;

pub fn info(_params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    require_replay(state)?;
    let info = state
        .capture_info
        .as_ref()
        .ok_or_else(|| RdcError::Precondition("no capture metadata".to_string()))?;
    Ok((
        json!({
            "api_name": info.api_name,
            "gpu_name": info.gpu_name,
            "driver": info.driver,
            "width": info.width,
            "height": info.height,
            "frame": info.frame,
            "event_count": state.root_actions.iter().count(),
            "draw_count": state.root_actions.iter().filter(|n| n.is_draw()).count(),
        }),
        true,
    ))
}

pub fn stats(_params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    require_replay(state)?;
    let passes = crate::passes::detect_passes(&state.root_actions);
    let pass_stats: Vec<Value> = passes
        .iter()
        .map(|p| json!({"name": p.name, "draws": p.draws, "dispatches": p.dispatches, "triangles": p.triangles}))
        .collect();

    let mut top_draws: Vec<(Eid, u64)> = state
        .root_actions
        .iter()
        .filter(|n| n.is_draw())
        .map(|n| (n.eid, n.triangle_estimate.unwrap_or(0)))
        .collect();
    top_draws.sort_by(|a, b| b.1.cmp(&a.1));
    top_draws.truncate(10);

    let mut resources = state.adapter().map(|a| a.resources()).unwrap_or_default();
    resources.sort_by_key(|r| match r {
        rdc_core::ResourceDesc::Texture(t) => std::cmp::Reverse(t.byte_size),
        rdc_core::ResourceDesc::Buffer(b) => std::cmp::Reverse(b.length),
    });
    resources.truncate(10);

    Ok((
        json!({
            "passes": pass_stats,
            "top_draws_by_triangles": top_draws.into_iter().map(|(eid, tris)| json!({"eid": eid, "triangles": tris})).collect::<Vec<_>>(),
            "largest_resources": resources.len(),
        }),
        true,
    ))
}

pub fn events(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    require_replay(state)?;
    let type_filter = get_str(params, "type");
    let limit = get_u32(params, "limit").unwrap_or(u32::MAX) as usize;

    let rows: Vec<Value> = state
        .root_actions
        .iter()
        .filter(|n| match type_filter {
            Some("draw") => n.is_draw(),
            Some("dispatch") => n.is_dispatch(),
            Some("marker") => n.flags.contains(ActionFlags::MARKER),
            _ => true,
        })
        .take(limit)
        .map(|n| json!({"eid": n.eid, "type": event_type(n.flags), "name": n.name}))
        .collect();
    Ok((json!({"events": rows}), true))
}

fn event_type(flags: ActionFlags) -> &'static str {
    if flags.contains(ActionFlags::DRAWCALL) {
        "draw"
    } else if flags.contains(ActionFlags::DISPATCH) {
        "dispatch"
    } else if flags.contains(ActionFlags::BEGIN_PASS) {
        "begin_pass"
    } else if flags.contains(ActionFlags::END_PASS) {
        "end_pass"
    } else if flags.contains(ActionFlags::CLEAR) {
        "clear"
    } else if flags.contains(ActionFlags::COPY) {
        "copy"
    } else if flags.contains(ActionFlags::RESOLVE) {
        "resolve"
    } else {
        "marker"
    }
}

pub fn draws(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    require_replay(state)?;
    let pass_filter = get_str(params, "pass");
    let limit = get_u32(params, "limit").unwrap_or(u32::MAX) as usize;

    let passes = crate::passes::detect_passes(&state.root_actions);
    let range = pass_filter.and_then(|name| {
        passes
            .iter()
            .find(|p| p.name == name)
            .map(|p| (p.begin_eid, p.end_eid))
    });

    let mut rows: Vec<Value> = Vec::new();
    let mut triangles_total: u64 = 0;
    for n in state.root_actions.iter().filter(|n| n.is_draw() || n.is_dispatch()) {
        if let Some((lo, hi)) = range {
            if n.eid < lo || n.eid > hi {
                continue;
            }
        } else if let Some(name) = pass_filter {
            // No computed pass matched `name`; fall back to API-name equality
            // against the event's own marker group (spec §4.7).
            if n.pass_name.as_deref() != Some(name) {
                continue;
            }
        }
        let pass_name = passes
            .iter()
            .find(|p| n.eid >= p.begin_eid && n.eid <= p.end_eid)
            .map(|p| p.name.clone());
        triangles_total += n.triangle_estimate.unwrap_or(0);
        rows.push(json!({
            "eid": n.eid,
            "type": if n.is_draw() { "draw" } else { "dispatch" },
            "triangles": n.triangle_estimate.unwrap_or(0),
            "instances": n.instance_count.unwrap_or(1),
            "pass": pass_name,
            "marker": n.pass_name,
        }));
        if rows.len() >= limit {
            break;
        }
    }

    Ok((
        json!({
            "draws": rows,
            "summary": format!("{} draws, {} triangles", rows.len(), triangles_total),
        }),
        true,
    ))
}

pub fn event(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    require_replay(state)?;
    let eid = get_u32(params, "eid").ok_or_else(|| RdcError::InvalidParams("missing `eid`".to_string()))?;
    check_eid_range(eid, state)?;
    let node = state
        .root_actions
        .find(eid)
        .ok_or_else(|| RdcError::NotFound(format!("event {eid}")))?;
    Ok((
        json!({
            "eid": node.eid,
            "api_call": node.name,
            "parameters": {},
        }),
        true,
    ))
}

pub fn draw(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    require_replay(state)?;
    let eid = crate::handlers::support::resolve_eid(params, state)?;
    check_eid_range(eid, state)?;
    let adapter = state.adapter.as_deref_mut().expect("checked above");
    let pipeline = state.replay_head.with_seek(adapter, eid, |a| {
        a.pipeline_state().map_err(RdcError::from)
    })?;
    Ok((serde_json::to_value(pipeline).map_err(|e| RdcError::Internal(e.to_string()))?, true))
}

pub fn log(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let adapter = require_replay(state)?;
    let level = get_str(params, "level");
    let eid_filter = get_u32(params, "eid");
    let rows: Vec<Value> = adapter
        .get_debug_messages()
        .into_iter()
        .filter(|m| level.map(|l| m.severity.eq_ignore_ascii_case(l)).unwrap_or(true))
        .filter(|m| eid_filter.map(|e| m.eid == e).unwrap_or(true))
        .map(|m| json!({"eid": m.eid, "severity": m.severity, "category": m.category, "text": m.text}))
        .collect();
    Ok((json!({"messages": rows}), true))
}

#[cfg(test)]
#[path = "inspect_tests.rs"]
mod tests;
