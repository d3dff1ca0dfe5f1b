// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Query and mutation handlers, grouped by subject (spec §4.7). Every
//! function here has the shape `fn(&Value, &mut DaemonState) -> Result<(Value, bool), RdcError>`
//! and is wired into the method registry in [`crate::dispatch`].

pub mod debug;
pub mod fs;
pub mod inspect;
pub mod mesh;
pub mod pass;
pub mod pipeline;
pub mod resource;
pub mod session;
pub mod shader;
pub mod support;
