// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capture data types shared between the replay adapter contract and the
//! query handlers: pipeline state, resources, shaders, counters (see
//! spec §6.5).

use serde::{Deserialize, Serialize};

use crate::action::Eid;

/// Metadata returned by `ReplayAdapter::open` (spec §6.5).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaptureInfo {
    pub api_name: String,
    pub gpu_name: String,
    pub driver: String,
    pub width: u32,
    pub height: u32,
    pub frame: u64,
}

/// A 64-bit byte-size field that uses `u64::MAX` as an "unknown" sentinel
/// (spec §8 boundary behaviors: rendered as `"-"` on the wire, never as the
/// raw integer).
pub type ByteSize = u64;
pub const UNKNOWN_BYTE_SIZE: ByteSize = u64::MAX;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Hull,
    Domain,
    Geometry,
    Pixel,
    Compute,
}

impl ShaderStage {
    pub fn as_str(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "Vertex",
            ShaderStage::Hull => "Hull",
            ShaderStage::Domain => "Domain",
            ShaderStage::Geometry => "Geometry",
            ShaderStage::Pixel => "Pixel",
            ShaderStage::Compute => "Compute",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scissor {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColorBlend {
    pub enabled: bool,
    pub write_mask: u8,
    pub blend_op: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StencilFace {
    pub func: String,
    pub fail_op: String,
    pub depth_fail_op: String,
    pub pass_op: String,
    pub ref_value: u32,
    pub compare_mask: u32,
    pub write_mask: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VertexInput {
    pub name: String,
    pub format: String,
    pub buffer_slot: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sampler {
    pub filter: String,
    pub address_u: String,
    pub address_v: String,
    pub address_w: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VertexBuffer {
    pub resource_id: String,
    pub byte_offset: ByteSize,
    pub byte_stride: u32,
    pub byte_size: ByteSize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexBuffer {
    pub resource_id: String,
    pub byte_offset: ByteSize,
    pub byte_size: ByteSize,
    pub index_width: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rasterizer {
    pub fill_mode: String,
    pub cull_mode: String,
    pub front_ccw: bool,
    pub depth_bias: f32,
    pub depth_clip: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepthStencilState {
    pub depth_enable: bool,
    pub depth_write: bool,
    pub depth_func: String,
    pub stencil_enable: bool,
    pub front: StencilFace,
    pub back: StencilFace,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MultisampleState {
    pub sample_count: u32,
    pub sample_mask: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PushConstantRange {
    pub stage: String,
    pub offset: u32,
    pub size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShaderRef {
    pub stage: String,
    pub shader_id: String,
    pub entry_point: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsedDescriptor {
    pub stage: String,
    pub set: u32,
    pub binding: u32,
    pub access: String,
    pub resource_id: Option<String>,
    pub sampler_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputTarget {
    pub slot: u32,
    pub resource_id: String,
    pub format: String,
}

/// The full pipeline state snapshot (spec §6.5 `pipeline_state()`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineState {
    pub eid: Eid,
    pub primitive_topology: String,
    pub viewports: Vec<Viewport>,
    pub scissors: Vec<Scissor>,
    pub color_blends: Vec<ColorBlend>,
    pub vertex_inputs: Vec<VertexInput>,
    pub samplers: Vec<(String, Vec<Sampler>)>,
    pub vertex_buffers: Vec<VertexBuffer>,
    pub index_buffer: Option<IndexBuffer>,
    pub rasterizer: Rasterizer,
    pub depth_stencil: Option<DepthStencilState>,
    pub msaa: Option<MultisampleState>,
    pub push_constants: Vec<PushConstantRange>,
    pub shaders: Vec<ShaderRef>,
    pub descriptors: Vec<UsedDescriptor>,
    pub output_targets: Vec<OutputTarget>,
    pub depth_target: Option<OutputTarget>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextureDesc {
    pub id: String,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub mips: u32,
    pub array_size: u32,
    pub format: String,
    pub byte_size: ByteSize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BufferDesc {
    pub id: String,
    pub name: String,
    pub length: ByteSize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ResourceDesc {
    Texture(TextureDesc),
    Buffer(BufferDesc),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShaderInfo {
    pub id: String,
    pub stage: String,
    pub entry_point: String,
    pub used_by_draws: Vec<Eid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShaderIoVar {
    pub name: String,
    pub semantic: String,
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShaderReflection {
    pub inputs: Vec<ShaderIoVar>,
    pub outputs: Vec<ShaderIoVar>,
    pub constant_blocks: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShaderSource {
    pub source_files: Vec<(String, String)>,
    pub disassembly: String,
    pub has_debug_info: bool,
}

/// A recursive shader constant variable node (spec §9 design notes: tagged
/// variant, recursion bounded at 8, deeper members flattened with dot-path
/// names).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConstantVar {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub rows: u32,
    pub cols: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<ConstantVar>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DebugMessage {
    pub eid: Eid,
    pub severity: String,
    pub category: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CounterDesc {
    pub uuid: String,
    pub name: String,
    pub description: String,
    pub unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CounterResult {
    pub eid: Eid,
    pub uuid: String,
    pub value: f64,
}

/// One step of a native shader-debug trace (spec §6.5 `continue_debug`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DebugStep {
    pub step_index: u32,
    pub instruction: String,
    pub registers: Vec<(String, serde_json::Value)>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DebugTrace {
    pub trace_handle: String,
    pub steps: Vec<DebugStep>,
    pub finished: bool,
}
