// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lazy shader inventory cache (spec §3.2, §9 design notes): built on first
//! demand by walking every draw, seeking each, and restoring the saved EID
//! at the end. No partial-cache publication — the cache is only replaced
//! once the full walk completes.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use rdc_adapters::ReplayAdapter;
use rdc_core::{Eid, RdcError};

use crate::replay_head::ReplayHead;

#[derive(Debug, Clone, Default)]
pub struct DrawShaders {
    pub stages: IndexMap<String, String>, // stage name -> shader id
}

#[derive(Default)]
pub struct ShaderCache {
    built: bool,
    by_draw: BTreeMap<Eid, DrawShaders>,
}

impl ShaderCache {
    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn get(&self, eid: Eid) -> Option<&DrawShaders> {
        self.by_draw.get(&eid)
    }

    /// Build the cache by walking every draw in `draw_eids`, seeking each
    /// in turn and recording its active per-stage shaders. Restores the
    /// adapter to the caller's current position afterward.
    pub fn build(
        &mut self,
        adapter: &mut dyn ReplayAdapter,
        head: &mut ReplayHead,
        draw_eids: &[Eid],
    ) -> Result<(), RdcError> {
        let saved = head.current_eid;
        let result = (|| -> Result<BTreeMap<Eid, DrawShaders>, RdcError> {
            let mut fresh = BTreeMap::new();
            for &eid in draw_eids {
                head.seek(adapter, eid)?;
                let state = adapter.pipeline_state()?;
                let mut stages = IndexMap::new();
                for shader in &state.shaders {
                    stages.insert(shader.stage.clone(), shader.shader_id.clone());
                }
                fresh.insert(eid, DrawShaders { stages });
            }
            Ok(fresh)
        })();
        if saved > 0 && saved != head.head_eid {
            // Best-effort restore; a restore failure shouldn't mask the build result.
            let _ = head.seek(adapter, saved);
        }
        self.by_draw = result?;
        self.built = true;
        Ok(())
    }

    pub fn invalidate(&mut self) {
        self.built = false;
        self.by_draw.clear();
    }
}

#[cfg(test)]
#[path = "shader_cache_tests.rs"]
mod tests;
