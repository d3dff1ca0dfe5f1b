// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Replay engine: process-wide daemon state, the replay head, pass
//! detection, the shader cache, the virtual filesystem, and the handler
//! registry that the daemon's accept loop dispatches requests through.

pub mod dispatch;
pub mod handlers;
pub mod passes;
pub mod replay_head;
pub mod shader_cache;
pub mod state;
pub mod vfs;

pub use dispatch::dispatch;
pub use passes::{detect_passes, PassEntry};
pub use replay_head::ReplayHead;
pub use shader_cache::ShaderCache;
pub use state::DaemonState;
pub use vfs::VfsTree;
