// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors an adapter can raise, and their mapping onto the wire error
//! taxonomy (spec §7: "adapter native failure inside otherwise-typed op is
//! mapped to nearest kind above").

use rdc_core::RdcError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("precondition failed: {0}")]
    Precondition(String),

    #[error("invalid parameter: {0}")]
    InvalidParams(String),

    #[error("operation timed out: {0}")]
    Timeout(String),

    #[error("native debug unavailable: {0}")]
    DebugUnavailable(String),

    #[error("native adapter failure: {0}")]
    Native(String),
}

impl From<AdapterError> for RdcError {
    fn from(err: AdapterError) -> Self {
        match err {
            AdapterError::NotFound(m) => RdcError::NotFound(m),
            AdapterError::Precondition(m) => RdcError::Precondition(m),
            AdapterError::InvalidParams(m) => RdcError::InvalidParams(m),
            AdapterError::Timeout(m) => RdcError::Timeout(m),
            AdapterError::DebugUnavailable(m) => RdcError::DebugUnavailable(m),
            // No more specific kind applies; surfaced as an internal error
            // with the native message preserved for the server-side log.
            AdapterError::Native(m) => RdcError::Internal(m),
        }
    }
}
