// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rdc-adapters: the `ReplayAdapter` contract and its test-support
//! implementation (spec §6.5).

mod error;
mod fake;
mod replay;
mod structured;

pub use error::AdapterError;
pub use replay::{DecodedRow, ReplayAdapter, TextureExportFormat, TextureExportSpec};
pub use structured::{JsonChunk, StructuredChunk};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use fake::{AdapterCall, FakeReplayAdapter};
