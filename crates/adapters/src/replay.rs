// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `ReplayAdapter` contract (spec §6.5): the boundary between the
//! language-agnostic capture inspector and the native GPU replay engine it
//! wraps. Everything above this trait is adapter-agnostic; only
//! [`crate::fake::FakeReplayAdapter`] is implemented here.

use std::path::Path;

use rdc_core::{
    ActionTree, BufferDesc, ConstantVar, CounterDesc, CounterResult, DebugMessage, DebugTrace,
    Eid, PipelineState, ResourceDesc, ShaderInfo, ShaderReflection, ShaderSource, TextureDesc,
};

use crate::error::AdapterError;
use crate::structured::StructuredChunk;

/// What to export when reading back a texture (spec §6.5 `save_texture`).
#[derive(Debug, Clone)]
pub struct TextureExportSpec {
    pub resource_id: String,
    pub mip: u32,
    pub slice: u32,
    pub format: TextureExportFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureExportFormat {
    Png,
    Raw,
}

/// A decoded vertex/index/mesh data row, rendered by handlers as TSV
/// (spec §4.7: `postvs`, `vbuffer_decode`, `ibuffer_decode`, `mesh_data`).
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRow {
    pub columns: Vec<String>,
}

/// The replay engine's external contract. A production implementation wraps
/// a native GPU capture/replay library; only [`crate::FakeReplayAdapter`]
/// exists in this repository, simulating the deterministic seed scenario
/// used by the test suite.
pub trait ReplayAdapter: Send {
    fn open(&mut self, capture_path: &Path) -> Result<rdc_core::CaptureInfo, AdapterError>;

    fn root_actions(&self) -> ActionTree;

    fn structured_file(&self) -> &dyn StructuredChunk;

    /// Position the adapter at `eid`. `force_full` requests a full replay
    /// rebuild rather than an incremental seek (used when the previous
    /// position is unknown, e.g. right after `open`).
    fn set_frame_event(&mut self, eid: Eid, force_full: bool) -> Result<(), AdapterError>;

    /// Answers for the draw currently under the replay head (set via
    /// [`ReplayAdapter::set_frame_event`]).
    fn pipeline_state(&self) -> Result<PipelineState, AdapterError>;

    fn textures(&self) -> Vec<TextureDesc>;
    fn buffers(&self) -> Vec<BufferDesc>;
    fn resources(&self) -> Vec<ResourceDesc>;

    fn get_texture_data(&self, id: &str, sub: u32) -> Result<Vec<u8>, AdapterError>;
    fn save_texture(&self, spec: &TextureExportSpec, path: &Path) -> Result<u64, AdapterError>;
    fn get_buffer_data(&self, id: &str, offset: u64, length: u64) -> Result<Vec<u8>, AdapterError>;

    fn shaders(&self) -> Vec<ShaderInfo>;
    fn shader_reflect(&self, shader_id: &str) -> Result<ShaderReflection, AdapterError>;
    fn shader_source(&self, shader_id: &str) -> Result<ShaderSource, AdapterError>;
    fn shader_targets(&self) -> Vec<String>;
    fn disassemble_shader(&self, shader_id: &str, target_name: &str) -> Result<String, AdapterError>;

    #[allow(clippy::too_many_arguments)]
    fn get_cbuffer_variable_contents(
        &self,
        shader_id: &str,
        stage: &str,
        block_index: u32,
        resource_id: &str,
        byte_offset: u64,
        byte_size: u64,
    ) -> Result<Vec<ConstantVar>, AdapterError>;

    fn postvs(&self, stream: u32) -> Result<Vec<DecodedRow>, AdapterError>;
    fn vbuffer_decode(&self, stream: u32) -> Result<Vec<DecodedRow>, AdapterError>;
    fn ibuffer_decode(&self) -> Result<Vec<DecodedRow>, AdapterError>;
    fn mesh_data(&self, stream: u32) -> Result<Vec<DecodedRow>, AdapterError>;

    fn counters(&self) -> Vec<CounterDesc>;
    fn fetch_counters(&self, eids: &[Eid], uuids: &[String]) -> Result<Vec<CounterResult>, AdapterError>;

    fn get_debug_messages(&self) -> Vec<DebugMessage>;

    fn debug_pixel(
        &mut self,
        x: u32,
        y: u32,
        inputs: &serde_json::Value,
    ) -> Result<DebugTrace, AdapterError>;
    fn debug_vertex(
        &mut self,
        vertex_id: u32,
        instance: u32,
        index: u32,
        view: u32,
    ) -> Result<DebugTrace, AdapterError>;
    fn debug_thread(&mut self, group: [u32; 3], thread: [u32; 3]) -> Result<DebugTrace, AdapterError>;
    fn continue_debug(&mut self, trace_handle: &str) -> Result<DebugTrace, AdapterError>;
    fn free_trace(&mut self, trace_handle: &str);

    /// Create a native replay output for overlay rendering. No-op for
    /// headless adapters; returns an opaque handle string.
    fn create_output(&mut self, windowing: &str, kind: &str) -> Result<String, AdapterError>;
    fn set_texture_display(&mut self, output: &str, resource_id: &str) -> Result<(), AdapterError>;
    fn display(&mut self, output: &str) -> Result<(), AdapterError>;
    fn get_debug_overlay_tex_id(&mut self, output: &str) -> Result<String, AdapterError>;

    /// Release all native resources. Called exactly once, on shutdown.
    fn shutdown(&mut self);
}
