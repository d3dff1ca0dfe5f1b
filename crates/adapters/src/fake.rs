// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A deterministic, in-memory [`ReplayAdapter`] used by the engine's and
//! daemon's test suites (spec §8 seed scenarios): 50 events across three
//! render passes — "Shadow" (10 draws), "GBuffer" (20 draws), "UI" (5
//! draws) — two textures, one vertex buffer, one index buffer, and a
//! vertex + pixel shader pair bound at every draw.

use std::path::Path;

use parking_lot::Mutex;
use rdc_core::{
    ActionFlags, ActionNode, ActionTree, BufferDesc, CaptureInfo, ColorBlend, ConstantVar,
    CounterDesc, CounterResult, DebugMessage, DebugStep, DebugTrace, DepthStencilState, Eid,
    IndexBuffer, MultisampleState, OutputTarget, PipelineState, Rasterizer, ResourceDesc,
    Scissor, ShaderInfo, ShaderIoVar, ShaderReflection, ShaderRef, ShaderSource, StencilFace,
    TextureDesc, UsedDescriptor, VertexBuffer, VertexInput, Viewport,
};

use crate::error::AdapterError;
use crate::replay::{DecodedRow, ReplayAdapter, TextureExportFormat, TextureExportSpec};
use crate::structured::{JsonChunk, StructuredChunk};

const VS_SHADER: &str = "shader-vs-0001";
const PS_SHADER: &str = "shader-ps-0002";

/// Call recorded for assertions in adapter-facing tests.
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterCall {
    Open(String),
    SetFrameEvent { eid: Eid, force_full: bool },
    Shutdown,
}

struct FakeState {
    opened: bool,
    head_eid: Eid,
    calls: Vec<AdapterCall>,
}

/// In-memory stand-in for a native replay engine.
pub struct FakeReplayAdapter {
    state: Mutex<FakeState>,
    action_tree: ActionTree,
    structured: JsonChunk,
}

impl Default for FakeReplayAdapter {
    fn default() -> Self {
        let action_tree = build_seed_action_tree();
        let structured = JsonChunk::new(
            "root",
            serde_json::json!({"events": action_tree.max_eid}),
        );
        Self {
            state: Mutex::new(FakeState {
                opened: false,
                head_eid: 0,
                calls: Vec::new(),
            }),
            action_tree,
            structured,
        }
    }
}

impl FakeReplayAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded so far, for test assertions.
    pub fn calls(&self) -> Vec<AdapterCall> {
        self.state.lock().calls.clone()
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().opened
    }

    pub fn head_eid(&self) -> Eid {
        self.state.lock().head_eid
    }

    /// Validates that the replay head currently sits on a draw, and returns
    /// its eid.
    fn draw_shaders(&self) -> Result<Eid, AdapterError> {
        let eid = self.state.lock().head_eid;
        if self.action_tree.find(eid).map(|n| n.is_draw()) != Some(true) {
            return Err(AdapterError::Precondition(format!(
                "eid {eid} is not a draw"
            )));
        }
        Ok(eid)
    }
}

/// Builds the seed tree with eids assigned in recording order: a pass's
/// BeginRenderPass action precedes the draws and group marker it contains,
/// which precede the EndRenderPass action.
fn build_seed_action_tree() -> ActionTree {
    let mut eid: Eid = 0;
    let mut next = || {
        eid += 1;
        eid
    };

    let clear = ActionNode::new(next(), "Clear RTV", ActionFlags::CLEAR);

    let mut pass = |api_name: &str, group_name: &str, draw_count: u32| -> ActionNode {
        let pass_eid = next();
        let group_eid = next();
        let draw_nodes: Vec<ActionNode> = (0..draw_count)
            .map(|i| ActionNode::new(next(), format!("DrawIndexed({i})"), ActionFlags::DRAWCALL))
            .collect();
        let group = ActionNode::new(group_eid, group_name, ActionFlags::MARKER).with_children(draw_nodes);
        let end = ActionNode::new(next(), "vkCmdEndRenderPass()", ActionFlags::END_PASS);
        ActionNode::new(pass_eid, api_name, ActionFlags::BEGIN_PASS)
            .with_children(vec![group, end])
    };

    let shadow = pass("vkCmdBeginRenderPass(C=Clear, D=Clear)", "Shadow", 10);
    let gbuffer = pass("vkCmdBeginRenderPass(C=Clear, C=Clear, C=Clear, D=Clear)", "GBuffer", 20);
    let ui = pass("vkCmdBeginRenderPass(C=Load)", "UI", 5);

    let copy = ActionNode::new(next(), "Copy depth", ActionFlags::COPY);
    let resolve = ActionNode::new(next(), "Resolve MSAA", ActionFlags::RESOLVE);
    let marker = ActionNode::new(next(), "Frame End Marker", ActionFlags::MARKER);
    let present_marker = ActionNode::new(next(), "Present Marker", ActionFlags::MARKER);
    let present = ActionNode::new(next(), "Present", ActionFlags::MARKER);

    let max_eid = eid;
    ActionTree {
        roots: vec![clear, shadow, gbuffer, ui, copy, resolve, marker, present_marker, present],
        max_eid,
    }
}

impl ReplayAdapter for FakeReplayAdapter {
    fn open(&mut self, capture_path: &Path) -> Result<CaptureInfo, AdapterError> {
        let mut state = self.state.lock();
        state.opened = true;
        state
            .calls
            .push(AdapterCall::Open(capture_path.display().to_string()));
        Ok(CaptureInfo {
            api_name: "Vulkan".to_string(),
            gpu_name: "Fake GPU 9000".to_string(),
            driver: "fake-driver-1.0".to_string(),
            width: 1920,
            height: 1080,
            frame: 42,
        })
    }

    fn root_actions(&self) -> ActionTree {
        self.action_tree.clone()
    }

    fn structured_file(&self) -> &dyn StructuredChunk {
        &self.structured
    }

    fn set_frame_event(&mut self, eid: Eid, force_full: bool) -> Result<(), AdapterError> {
        if eid > self.action_tree.max_eid {
            return Err(AdapterError::InvalidParams(format!(
                "eid {eid} exceeds max_eid {}",
                self.action_tree.max_eid
            )));
        }
        let mut state = self.state.lock();
        state.head_eid = eid;
        state.calls.push(AdapterCall::SetFrameEvent { eid, force_full });
        Ok(())
    }

    fn pipeline_state(&self) -> Result<PipelineState, AdapterError> {
        let eid = self.draw_shaders()?;
        Ok(PipelineState {
            eid,
            primitive_topology: "TriangleList".to_string(),
            viewports: vec![Viewport {
                x: 0.0,
                y: 0.0,
                width: 1920.0,
                height: 1080.0,
                min_depth: 0.0,
                max_depth: 1.0,
            }],
            scissors: vec![Scissor {
                x: 0,
                y: 0,
                width: 1920,
                height: 1080,
            }],
            color_blends: vec![ColorBlend {
                enabled: false,
                write_mask: 0xF,
                blend_op: "Add".to_string(),
            }],
            vertex_inputs: vec![VertexInput {
                name: "POSITION".to_string(),
                format: "R32G32B32_FLOAT".to_string(),
                buffer_slot: 0,
                offset: 0,
            }],
            samplers: vec![],
            vertex_buffers: vec![VertexBuffer {
                resource_id: "buf-vertex-0001".to_string(),
                byte_offset: 0,
                byte_stride: 32,
                byte_size: 1 << 16,
            }],
            index_buffer: Some(IndexBuffer {
                resource_id: "buf-index-0001".to_string(),
                byte_offset: 0,
                byte_size: 1 << 14,
                index_width: 4,
            }),
            rasterizer: Rasterizer {
                fill_mode: "Solid".to_string(),
                cull_mode: "Back".to_string(),
                front_ccw: true,
                depth_bias: 0.0,
                depth_clip: true,
            },
            depth_stencil: Some(DepthStencilState {
                depth_enable: true,
                depth_write: true,
                depth_func: "Less".to_string(),
                stencil_enable: false,
                front: StencilFace {
                    func: "Always".to_string(),
                    fail_op: "Keep".to_string(),
                    depth_fail_op: "Keep".to_string(),
                    pass_op: "Keep".to_string(),
                    ref_value: 0,
                    compare_mask: 0xFF,
                    write_mask: 0xFF,
                },
                back: StencilFace {
                    func: "Always".to_string(),
                    fail_op: "Keep".to_string(),
                    depth_fail_op: "Keep".to_string(),
                    pass_op: "Keep".to_string(),
                    ref_value: 0,
                    compare_mask: 0xFF,
                    write_mask: 0xFF,
                },
            }),
            msaa: Some(MultisampleState {
                sample_count: 1,
                sample_mask: u32::MAX,
            }),
            push_constants: vec![],
            shaders: vec![
                ShaderRef {
                    stage: "Vertex".to_string(),
                    shader_id: VS_SHADER.to_string(),
                    entry_point: "main".to_string(),
                },
                ShaderRef {
                    stage: "Pixel".to_string(),
                    shader_id: PS_SHADER.to_string(),
                    entry_point: "main".to_string(),
                },
            ],
            descriptors: vec![UsedDescriptor {
                stage: "Pixel".to_string(),
                set: 0,
                binding: 0,
                access: "Read".to_string(),
                resource_id: Some("tex-0001".to_string()),
                sampler_id: Some("sampler-0001".to_string()),
            }],
            output_targets: vec![OutputTarget {
                slot: 0,
                resource_id: "tex-0001".to_string(),
                format: "R8G8B8A8_UNORM".to_string(),
            }],
            depth_target: Some(OutputTarget {
                slot: 0,
                resource_id: "tex-0002".to_string(),
                format: "D32_FLOAT".to_string(),
            }),
        })
    }

    fn textures(&self) -> Vec<TextureDesc> {
        vec![
            TextureDesc {
                id: "tex-0001".to_string(),
                name: "SceneColor".to_string(),
                width: 1920,
                height: 1080,
                depth: 1,
                mips: 1,
                array_size: 1,
                format: "R8G8B8A8_UNORM".to_string(),
                byte_size: 1920 * 1080 * 4,
            },
            TextureDesc {
                id: "tex-0002".to_string(),
                name: "SceneDepth".to_string(),
                width: 1920,
                height: 1080,
                depth: 1,
                mips: 1,
                array_size: 1,
                format: "D32_FLOAT".to_string(),
                byte_size: 1920 * 1080 * 4,
            },
        ]
    }

    fn buffers(&self) -> Vec<BufferDesc> {
        vec![
            BufferDesc {
                id: "buf-vertex-0001".to_string(),
                name: "SceneVertexBuffer".to_string(),
                length: 1 << 16,
            },
            BufferDesc {
                id: "buf-index-0001".to_string(),
                name: "SceneIndexBuffer".to_string(),
                length: 1 << 14,
            },
        ]
    }

    fn resources(&self) -> Vec<ResourceDesc> {
        self.textures()
            .into_iter()
            .map(ResourceDesc::Texture)
            .chain(self.buffers().into_iter().map(ResourceDesc::Buffer))
            .collect()
    }

    fn get_texture_data(&self, id: &str, _sub: u32) -> Result<Vec<u8>, AdapterError> {
        if !self.textures().iter().any(|t| t.id == id) {
            return Err(AdapterError::NotFound(format!("texture {id}")));
        }
        Ok(vec![0u8; 64])
    }

    fn save_texture(&self, spec: &TextureExportSpec, path: &Path) -> Result<u64, AdapterError> {
        if !self.textures().iter().any(|t| t.id == spec.resource_id) {
            return Err(AdapterError::NotFound(format!(
                "texture {}",
                spec.resource_id
            )));
        }
        let bytes: &[u8] = match spec.format {
            TextureExportFormat::Png => &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A],
            TextureExportFormat::Raw => &[0u8; 64],
        };
        std::fs::write(path, bytes).map_err(|e| AdapterError::Native(e.to_string()))?;
        Ok(bytes.len() as u64)
    }

    fn get_buffer_data(&self, id: &str, offset: u64, length: u64) -> Result<Vec<u8>, AdapterError> {
        if !self.buffers().iter().any(|b| b.id == id) {
            return Err(AdapterError::NotFound(format!("buffer {id}")));
        }
        let _ = offset;
        Ok(vec![0u8; length as usize])
    }

    fn shaders(&self) -> Vec<ShaderInfo> {
        let draws: Vec<Eid> = self
            .action_tree
            .iter()
            .filter(|n| n.is_draw())
            .map(|n| n.eid)
            .collect();
        vec![
            ShaderInfo {
                id: VS_SHADER.to_string(),
                stage: "Vertex".to_string(),
                entry_point: "main".to_string(),
                used_by_draws: draws.clone(),
            },
            ShaderInfo {
                id: PS_SHADER.to_string(),
                stage: "Pixel".to_string(),
                entry_point: "main".to_string(),
                used_by_draws: draws,
            },
        ]
    }

    fn shader_reflect(&self, shader_id: &str) -> Result<ShaderReflection, AdapterError> {
        match shader_id {
            VS_SHADER => Ok(ShaderReflection {
                inputs: vec![ShaderIoVar {
                    name: "POSITION".to_string(),
                    semantic: "POSITION0".to_string(),
                    format: "R32G32B32_FLOAT".to_string(),
                }],
                outputs: vec![ShaderIoVar {
                    name: "SV_Position".to_string(),
                    semantic: "SV_Position".to_string(),
                    format: "R32G32B32A32_FLOAT".to_string(),
                }],
                constant_blocks: vec!["PerFrame".to_string()],
            }),
            PS_SHADER => Ok(ShaderReflection {
                inputs: vec![ShaderIoVar {
                    name: "SV_Position".to_string(),
                    semantic: "SV_Position".to_string(),
                    format: "R32G32B32A32_FLOAT".to_string(),
                }],
                outputs: vec![ShaderIoVar {
                    name: "SV_Target0".to_string(),
                    semantic: "SV_Target0".to_string(),
                    format: "R8G8B8A8_UNORM".to_string(),
                }],
                constant_blocks: vec!["Material".to_string()],
            }),
            other => Err(AdapterError::NotFound(format!("shader {other}"))),
        }
    }

    fn shader_source(&self, shader_id: &str) -> Result<ShaderSource, AdapterError> {
        if shader_id != VS_SHADER && shader_id != PS_SHADER {
            return Err(AdapterError::NotFound(format!("shader {shader_id}")));
        }
        Ok(ShaderSource {
            source_files: vec![],
            disassembly: format!("; disassembly for {shader_id}\nmov r0, r0\nret"),
            has_debug_info: false,
        })
    }

    fn shader_targets(&self) -> Vec<String> {
        vec!["dxbc".to_string(), "spirv".to_string(), "glsl".to_string()]
    }

    fn disassemble_shader(&self, shader_id: &str, target_name: &str) -> Result<String, AdapterError> {
        if !self.shader_targets().contains(&target_name.to_string()) {
            return Err(AdapterError::InvalidParams(format!(
                "unknown disassembly target {target_name}"
            )));
        }
        self.shader_source(shader_id).map(|s| s.disassembly)
    }

    fn get_cbuffer_variable_contents(
        &self,
        shader_id: &str,
        stage: &str,
        block_index: u32,
        resource_id: &str,
        byte_offset: u64,
        byte_size: u64,
    ) -> Result<Vec<ConstantVar>, AdapterError> {
        self.draw_shaders()?;
        let _ = (shader_id, stage, block_index, resource_id, byte_offset, byte_size);
        Ok(vec![ConstantVar {
            name: "worldMatrix".to_string(),
            ty: "float4x4".to_string(),
            rows: 4,
            cols: 4,
            members: None,
            value: Some(serde_json::json!([
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0]
            ])),
        }])
    }

    fn postvs(&self, stream: u32) -> Result<Vec<DecodedRow>, AdapterError> {
        self.draw_shaders()?;
        let _ = stream;
        Ok((0..3)
            .map(|i| DecodedRow {
                columns: vec![i.to_string(), "0.0".into(), "0.0".into(), "0.0".into()],
            })
            .collect())
    }

    fn vbuffer_decode(&self, stream: u32) -> Result<Vec<DecodedRow>, AdapterError> {
        self.postvs(stream)
    }

    fn ibuffer_decode(&self) -> Result<Vec<DecodedRow>, AdapterError> {
        self.draw_shaders()?;
        Ok((0..3)
            .map(|i| DecodedRow {
                columns: vec![i.to_string()],
            })
            .collect())
    }

    fn mesh_data(&self, stream: u32) -> Result<Vec<DecodedRow>, AdapterError> {
        self.postvs(stream)
    }

    fn counters(&self) -> Vec<CounterDesc> {
        vec![CounterDesc {
            uuid: "00000000-0000-0000-0000-000000000001".to_string(),
            name: "GPU Duration".to_string(),
            description: "Time taken to process this event on the GPU".to_string(),
            unit: "seconds".to_string(),
        }]
    }

    fn fetch_counters(&self, eids: &[Eid], uuids: &[String]) -> Result<Vec<CounterResult>, AdapterError> {
        let known = self.counters();
        for uuid in uuids {
            if !known.iter().any(|c| &c.uuid == uuid) {
                return Err(AdapterError::NotFound(format!("counter {uuid}")));
            }
        }
        Ok(eids
            .iter()
            .flat_map(|&eid| {
                uuids.iter().map(move |uuid| CounterResult {
                    eid,
                    uuid: uuid.clone(),
                    value: 0.001,
                })
            })
            .collect())
    }

    fn get_debug_messages(&self) -> Vec<DebugMessage> {
        vec![]
    }

    fn debug_pixel(
        &mut self,
        x: u32,
        y: u32,
        _inputs: &serde_json::Value,
    ) -> Result<DebugTrace, AdapterError> {
        let eid = self.draw_shaders()?;
        Ok(DebugTrace {
            trace_handle: format!("trace-px-{eid}-{x}-{y}"),
            steps: vec![DebugStep {
                step_index: 0,
                instruction: "mov r0, v0".to_string(),
                registers: vec![],
            }],
            finished: true,
        })
    }

    fn debug_vertex(
        &mut self,
        vertex_id: u32,
        instance: u32,
        index: u32,
        _view: u32,
    ) -> Result<DebugTrace, AdapterError> {
        let eid = self.draw_shaders()?;
        Ok(DebugTrace {
            trace_handle: format!("trace-vtx-{eid}-{vertex_id}-{instance}-{index}"),
            steps: vec![DebugStep {
                step_index: 0,
                instruction: "mov o0, v0".to_string(),
                registers: vec![],
            }],
            finished: true,
        })
    }

    fn debug_thread(&mut self, group: [u32; 3], thread: [u32; 3]) -> Result<DebugTrace, AdapterError> {
        let eid = self.state.lock().head_eid;
        let node = self
            .action_tree
            .find(eid)
            .ok_or_else(|| AdapterError::NotFound(format!("eid {eid}")))?;
        if !node.is_dispatch() {
            return Err(AdapterError::DebugUnavailable(format!(
                "eid {eid} is not a compute dispatch"
            )));
        }
        Ok(DebugTrace {
            trace_handle: format!(
                "trace-cs-{eid}-{}-{}-{}-{}-{}-{}",
                group[0], group[1], group[2], thread[0], thread[1], thread[2]
            ),
            steps: vec![],
            finished: true,
        })
    }

    fn continue_debug(&mut self, trace_handle: &str) -> Result<DebugTrace, AdapterError> {
        Ok(DebugTrace {
            trace_handle: trace_handle.to_string(),
            steps: vec![],
            finished: true,
        })
    }

    fn free_trace(&mut self, _trace_handle: &str) {}

    fn create_output(&mut self, _windowing: &str, kind: &str) -> Result<String, AdapterError> {
        Ok(format!("output-{kind}"))
    }

    fn set_texture_display(&mut self, _output: &str, resource_id: &str) -> Result<(), AdapterError> {
        if !self.textures().iter().any(|t| t.id == resource_id) {
            return Err(AdapterError::NotFound(format!("texture {resource_id}")));
        }
        Ok(())
    }

    fn display(&mut self, _output: &str) -> Result<(), AdapterError> {
        Ok(())
    }

    fn get_debug_overlay_tex_id(&mut self, _output: &str) -> Result<String, AdapterError> {
        Ok("tex-overlay-0001".to_string())
    }

    fn shutdown(&mut self) {
        self.state.lock().calls.push(AdapterCall::Shutdown);
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
