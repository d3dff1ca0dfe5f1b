// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The error taxonomy shared by the engine, daemon, and CLI (see spec §4.2, §7).
//!
//! [`RdcError`] is the single error type handlers return; [`ErrorCode`] is the
//! stable JSON-RPC error code each variant maps to. Clients depend on these
//! codes staying fixed.

use thiserror::Error;

/// Stable JSON-RPC error codes (spec §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Unauthorized = -32000,
    NotFound = -32001,
    Precondition = -32002,
    Timeout = -32006,
    DebugUnavailable = -32007,
    MethodUnknown = -32601,
    InvalidParams = -32602,
    Internal = -32603,
}

impl ErrorCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// A handler-facing error. Every query handler returns `Result<_, RdcError>`;
/// the dispatch loop (rdc-daemon) maps each variant to a wire error response.
#[derive(Debug, Error)]
pub enum RdcError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("precondition failed: {0}")]
    Precondition(String),

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("operation timed out: {0}")]
    Timeout(String),

    #[error("native debug unavailable: {0}")]
    DebugUnavailable(String),

    #[error("unknown method: {0}")]
    MethodUnknown(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl RdcError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RdcError::Unauthorized => ErrorCode::Unauthorized,
            RdcError::NotFound(_) => ErrorCode::NotFound,
            RdcError::Precondition(_) => ErrorCode::Precondition,
            RdcError::InvalidParams(_) => ErrorCode::InvalidParams,
            RdcError::Timeout(_) => ErrorCode::Timeout,
            RdcError::DebugUnavailable(_) => ErrorCode::DebugUnavailable,
            RdcError::MethodUnknown(_) => ErrorCode::MethodUnknown,
            RdcError::Internal(_) => ErrorCode::Internal,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
