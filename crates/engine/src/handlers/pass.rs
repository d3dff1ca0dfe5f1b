// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `passes` / `pass` handlers (spec §4.6, §4.7).

use serde_json::{json, Value};

use rdc_core::RdcError;

use crate::handlers::support::{get_str, get_u32, require_replay};
use crate::state::DaemonState;

pub fn passes(_params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    require_replay(state)?;
    let entries = crate::passes::detect_passes(&state.root_actions);
    let rows: Vec<Value> = entries
        .iter()
        .map(|p| {
            json!({
                "name": p.name, "begin_eid": p.begin_eid, "end_eid": p.end_eid,
                "draws": p.draws, "dispatches": p.dispatches, "triangles": p.triangles,
            })
        })
        .collect();
    Ok((json!({"passes": rows}), true))
}

/// `pass` is looked up by index OR name; detail includes the output
/// attachments bound at the pass's first draw, fetched via a transient
/// seek that's restored afterward (spec §4.7).
pub fn pass(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    require_replay(state)?;
    let entries = crate::passes::detect_passes(&state.root_actions);
    let entry = if let Some(index) = get_u32(params, "index") {
        entries
            .get(index as usize)
            .ok_or_else(|| RdcError::NotFound(format!("pass index {index}")))?
            .clone()
    } else if let Some(name) = get_str(params, "name") {
        entries
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| RdcError::NotFound(format!("pass {name}")))?
            .clone()
    } else {
        return Err(RdcError::InvalidParams("provide `index` or `name`".to_string()));
    };

    let first_draw_eid = state
        .root_actions
        .iter()
        .find(|n| n.eid >= entry.begin_eid && n.eid <= entry.end_eid && (n.is_draw() || n.is_dispatch()))
        .map(|n| n.eid);

    let attachments = match first_draw_eid {
        Some(eid) => {
            let DaemonState { adapter, replay_head, .. } = state;
            let adapter = adapter.as_deref_mut().expect("checked by require_replay above");
            let ps = replay_head.with_seek(adapter, eid, |a| a.pipeline_state().map_err(RdcError::from))?;
            json!({"color": ps.output_targets, "depth": ps.depth_target})
        }
        None => Value::Null,
    };

    Ok((
        json!({
            "name": entry.name, "begin_eid": entry.begin_eid, "end_eid": entry.end_eid,
            "draws": entry.draws, "dispatches": entry.dispatches, "triangles": entry.triangles,
            "attachments": attachments,
        }),
        true,
    ))
}

#[cfg(test)]
#[path = "pass_tests.rs"]
mod tests;
