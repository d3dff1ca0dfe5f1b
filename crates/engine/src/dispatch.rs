// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handler registry and dispatch middleware (spec §4.3). Every method is
//! matched against a closed table carrying its handler function and a
//! `no_replay` flag; the precondition check against a loaded adapter
//! happens here and nowhere else.

use serde_json::Value;

use rdc_core::{ErrorCode, RdcError};

use crate::handlers::{debug, fs, inspect, mesh, pass, pipeline, resource, session, shader};
use crate::state::DaemonState;

pub type HandlerFn = fn(&Value, &mut DaemonState) -> Result<(Value, bool), RdcError>;

struct Entry {
    handler: HandlerFn,
    no_replay: bool,
}

/// `no_replay = true` exempts a handler from the "no replay loaded"
/// precondition (spec §4.3): `ping`, `status`, `goto`, `shutdown`, `count`.
fn lookup(method: &str) -> Option<Entry> {
    macro_rules! entry {
        ($f:expr, no_replay) => {
            Some(Entry { handler: $f, no_replay: true })
        };
        ($f:expr) => {
            Some(Entry { handler: $f, no_replay: false })
        };
    }

    match method {
        "ping" => entry!(session::ping, no_replay),
        "status" => entry!(session::status, no_replay),
        "goto" => entry!(session::goto, no_replay),
        "shutdown" => entry!(session::shutdown, no_replay),
        "count" => entry!(session::count, no_replay),

        "info" => entry!(inspect::info),
        "stats" => entry!(inspect::stats),
        "events" => entry!(inspect::events),
        "draws" => entry!(inspect::draws),
        "event" => entry!(inspect::event),
        "draw" => entry!(inspect::draw),
        "log" => entry!(inspect::log),

        "pipeline" => entry!(pipeline::pipeline),
        "pipe_topology" => entry!(pipeline::pipe_topology),
        "pipe_viewport" => entry!(pipeline::pipe_viewport),
        "pipe_scissor" => entry!(pipeline::pipe_scissor),
        "pipe_blend" => entry!(pipeline::pipe_blend),
        "pipe_stencil" => entry!(pipeline::pipe_stencil),
        "pipe_vinputs" => entry!(pipeline::pipe_vinputs),
        "pipe_samplers" => entry!(pipeline::pipe_samplers),
        "pipe_vbuffers" => entry!(pipeline::pipe_vbuffers),
        "pipe_ibuffer" => entry!(pipeline::pipe_ibuffer),
        "pipe_push_constants" => entry!(pipeline::pipe_push_constants),
        "pipe_rasterizer" => entry!(pipeline::pipe_rasterizer),
        "pipe_depth_stencil" => entry!(pipeline::pipe_depth_stencil),
        "pipe_msaa" => entry!(pipeline::pipe_msaa),
        "bindings" => entry!(pipeline::bindings),
        "descriptors" => entry!(pipeline::descriptors),

        "shader" => entry!(shader::shader),
        "shaders" => entry!(shader::shaders),
        "shader_map" => entry!(shader::shader_map),
        "shader_all" => entry!(shader::shader_all),
        "shader_targets" => entry!(shader::shader_targets),
        "shader_reflect" => entry!(shader::shader_reflect),
        "shader_constants" => entry!(shader::shader_constants),
        "shader_source" => entry!(shader::shader_source),
        "shader_disasm" => entry!(shader::shader_disasm),

        "resources" => entry!(resource::resources),
        "resource" => entry!(resource::resource),
        "tex_info" => entry!(resource::tex_info),
        "tex_export" => entry!(resource::tex_export),
        "tex_raw" => entry!(resource::tex_raw),
        "rt_export" => entry!(resource::rt_export),
        "rt_depth" => entry!(resource::rt_depth),
        "rt_overlay" => entry!(resource::rt_overlay),
        "buf_info" => entry!(resource::buf_info),
        "buf_raw" => entry!(resource::buf_raw),
        "usage" => entry!(resource::usage),
        "counters" => entry!(resource::counters),
        "counter_list" => entry!(resource::counter_list),

        "vbuffer_decode" => entry!(mesh::vbuffer_decode),
        "ibuffer_decode" => entry!(mesh::ibuffer_decode),
        "cbuffer_decode" => entry!(mesh::cbuffer_decode),
        "mesh_data" => entry!(mesh::mesh_data),
        "postvs" => entry!(mesh::postvs),

        "debug_pixel" => entry!(debug::debug_pixel),
        "debug_vertex" => entry!(debug::debug_vertex),
        "debug_thread" => entry!(debug::debug_thread),

        "passes" => entry!(pass::passes),
        "pass" => entry!(pass::pass),

        "vfs_ls" => entry!(fs::vfs_ls),
        "vfs_tree" => entry!(fs::vfs_tree),

        _ => None,
    }
}

/// Invoke `method` against `state`. Returns the result object and whether
/// the daemon's accept loop should keep running. Token authentication
/// happens one layer up, in the wire-protocol reader (spec §4.2) — by the
/// time a request reaches here it's already been authenticated.
pub fn dispatch(method: &str, params: &Value, state: &mut DaemonState) -> (Value, bool) {
    let Some(entry) = lookup(method) else {
        return (error_body(ErrorCode::MethodUnknown, format!("unknown method `{method}`")), true);
    };

    if !entry.no_replay && state.adapter.is_none() {
        return (error_body(ErrorCode::Precondition, "no replay loaded".to_string()), true);
    }

    state.touch();
    match (entry.handler)(params, state) {
        Ok((result, keep_running)) => (result, keep_running),
        Err(err) => (error_body(err.code(), err.to_string()), true),
    }
}

fn error_body(code: ErrorCode, message: String) -> Value {
    serde_json::json!({"error": {"code": code.code(), "message": message}})
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
