// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Replay Head: the single point of mutation for the adapter's replay
//! position (spec §3.4, §4.4). `seek` is transient and idempotent; `goto`
//! is the only operation that moves the user-visible cursor.

use rdc_adapters::ReplayAdapter;
use rdc_core::{Eid, RdcError};

/// Tracks the user-visible cursor (`current_eid`) and the adapter's actual
/// last-applied position (`head_eid`), which can diverge during a
/// transient `seek`.
pub struct ReplayHead {
    pub current_eid: Eid,
    pub head_eid: Eid,
    pub max_eid: Eid,
}

impl ReplayHead {
    pub fn new(max_eid: Eid) -> Self {
        Self {
            current_eid: 0,
            head_eid: 0,
            max_eid,
        }
    }

    /// Transient seek: positions the adapter at `eid` without touching
    /// `current_eid`. A no-op if the adapter is already there.
    pub fn seek(&mut self, adapter: &mut dyn ReplayAdapter, eid: Eid) -> Result<(), RdcError> {
        if eid > self.max_eid {
            return Err(RdcError::Precondition(format!(
                "eid {eid} out of range (max {})",
                self.max_eid
            )));
        }
        if self.head_eid == eid {
            return Ok(());
        }
        adapter
            .set_frame_event(eid, true)
            .map_err(rdc_core::RdcError::from)?;
        self.head_eid = eid;
        Ok(())
    }

    /// User-visible navigation: seeks, then assigns `current_eid`.
    /// Callers persist the session descriptor after this succeeds.
    pub fn goto(&mut self, adapter: &mut dyn ReplayAdapter, eid: Eid) -> Result<(), RdcError> {
        self.seek(adapter, eid)?;
        self.current_eid = eid;
        Ok(())
    }

    /// Run `f` with the adapter transiently positioned at `eid`, then
    /// restore the adapter to `current_eid` if `f` moved it elsewhere.
    /// Used by handlers that walk many draws (shader cache build, stats,
    /// pass detail) without disturbing the user's cursor.
    pub fn with_seek<T>(
        &mut self,
        adapter: &mut dyn ReplayAdapter,
        eid: Eid,
        f: impl FnOnce(&mut dyn ReplayAdapter) -> Result<T, RdcError>,
    ) -> Result<T, RdcError> {
        let saved = self.current_eid;
        self.seek(adapter, eid)?;
        let result = f(adapter);
        if saved != self.head_eid && saved > 0 {
            // Best-effort restore; a restore failure shouldn't mask the
            // original result.
            let _ = self.seek(adapter, saved);
        }
        result
    }
}

#[cfg(test)]
#[path = "replay_head_tests.rs"]
mod tests;
