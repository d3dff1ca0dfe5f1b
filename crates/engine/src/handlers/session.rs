// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session-lifecycle handlers: `ping`, `status`, `goto`, `shutdown`, `count`
//! (spec §4.3, §6.4). All but `goto`'s adapter-present seek are `no_replay`.

use serde_json::{json, Value};

use rdc_core::{format_elapsed, now_rfc3339, RdcError};

use crate::handlers::support::get_u32;
use crate::state::DaemonState;

pub fn ping(_params: &Value, _state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    Ok((json!({"pong": true, "time": now_rfc3339()}), true))
}

pub fn status(_params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let uptime = state.last_activity.elapsed().as_secs();
    Ok((
        json!({
            "session": state.session_name,
            "capture_path": state.capture_path.to_string_lossy(),
            "replay_loaded": state.adapter.is_some(),
            "current_eid": state.replay_head.current_eid,
            "max_eid": state.max_eid(),
            "idle_for": format_elapsed(uptime),
        }),
        true,
    ))
}

/// `goto` is `no_replay`: when no adapter is loaded, `current_eid` is
/// updated as a bookkeeping value without touching the replay head
/// (spec §4.3).
pub fn goto(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let eid = get_u32(params, "eid").ok_or_else(|| RdcError::InvalidParams("missing `eid`".to_string()))?;
    if state.adapter.is_none() {
        state.replay_head.current_eid = eid;
        return Ok((json!({"current_eid": eid}), true));
    }
    if eid > state.max_eid() {
        return Err(RdcError::Precondition(format!(
            "eid {eid} out of range (max {})",
            state.max_eid()
        )));
    }
    let adapter = state.adapter.as_deref_mut().expect("adapter checked above");
    state.replay_head.goto(adapter, eid)?;
    Ok((json!({"current_eid": eid}), true))
}

pub fn shutdown(_params: &Value, _state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    Ok((json!({"shutting_down": true}), false))
}

/// `count` reports trivially-derived quantities without requiring a loaded
/// replay (spec §4.3): event/draw/pass/resource counts, or zero when none
/// is loaded.
pub fn count(params: &Value, state: &mut DaemonState) -> Result<(Value, bool), RdcError> {
    let what = crate::handlers::support::get_str(params, "what").unwrap_or("events");
    let n = match what {
        "events" => state.root_actions.iter().count() as u64,
        "draws" => state.root_actions.iter().filter(|n| n.is_draw()).count() as u64,
        "passes" => crate::passes::detect_passes(&state.root_actions).len() as u64,
        "resources" => state.adapter().map(|a| a.resources().len()).unwrap_or(0) as u64,
        other => return Err(RdcError::InvalidParams(format!("unknown count target `{other}`"))),
    };
    Ok((json!({"what": what, "count": n}), true))
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
