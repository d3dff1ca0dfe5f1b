// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared parameter-extraction helpers for handlers (spec §4.7 skeleton).

use serde_json::Value;

use rdc_adapters::ReplayAdapter;
use rdc_core::{ByteSize, Eid, RdcError, UNKNOWN_BYTE_SIZE};

use crate::state::DaemonState;

pub fn require_replay(state: &DaemonState) -> Result<&dyn ReplayAdapter, RdcError> {
    state
        .adapter()
        .ok_or_else(|| RdcError::Precondition("no replay loaded".to_string()))
}

pub fn require_replay_mut(state: &mut DaemonState) -> Result<&mut dyn ReplayAdapter, RdcError> {
    state
        .adapter_mut()
        .ok_or_else(|| RdcError::Precondition("no replay loaded".to_string()))
}

pub fn get_str<'a>(params: &'a Value, key: &str) -> Option<&'a str> {
    params.get(key).and_then(Value::as_str)
}

pub fn require_str<'a>(params: &'a Value, key: &str) -> Result<&'a str, RdcError> {
    get_str(params, key).ok_or_else(|| RdcError::InvalidParams(format!("missing `{key}`")))
}

pub fn get_u32(params: &Value, key: &str) -> Option<u32> {
    params.get(key).and_then(Value::as_u64).map(|v| v as u32)
}

pub fn get_u64(params: &Value, key: &str) -> Option<u64> {
    params.get(key).and_then(Value::as_u64)
}

/// Resolve the EID a handler should operate on: explicit `params.eid`, else
/// the session's current EID — rejecting 0 as "nothing selected" (spec
/// §4.4: `current_eid == 0` means no draw is selected).
pub fn resolve_eid(params: &Value, state: &DaemonState) -> Result<Eid, RdcError> {
    match get_u32(params, "eid") {
        Some(eid) => Ok(eid),
        None => {
            let cur = state.replay_head.current_eid;
            if cur == 0 {
                Err(RdcError::Precondition(
                    "no eid given and no draw is currently selected".to_string(),
                ))
            } else {
                Ok(cur)
            }
        }
    }
}

pub fn check_eid_range(eid: Eid, state: &DaemonState) -> Result<(), RdcError> {
    if eid > state.max_eid() {
        return Err(RdcError::Precondition(format!(
            "eid {eid} out of range (max {})",
            state.max_eid()
        )));
    }
    Ok(())
}

/// Render a byte-size sentinel as `"-"` per spec §8 boundary behaviors.
pub fn byte_size_json(size: ByteSize) -> Value {
    if size == UNKNOWN_BYTE_SIZE {
        Value::String("-".to_string())
    } else {
        Value::from(size)
    }
}
