// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rdc-daemon library surface: the wire protocol, exposed so the CLI can
//! build requests and parse responses without linking the daemon binary.

pub mod protocol;

pub use protocol::{ProtocolError, RpcError, RpcRequest, RpcResponse, DEFAULT_CLIENT_TIMEOUT};
