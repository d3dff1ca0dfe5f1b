// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rdc-core: shared data model for the RenderDoc capture inspector daemon and CLI.

pub mod action;
pub mod error;
pub mod session_descriptor;
pub mod time_fmt;
pub mod token;
pub mod types;

pub use action::{ActionFlags, ActionIter, ActionNode, ActionTree, Eid};
pub use error::{ErrorCode, RdcError};
pub use session_descriptor::{SessionDescriptor, SessionDescriptorError};
pub use time_fmt::{format_elapsed, now_rfc3339};
pub use token::{generate_token, tokens_equal};
pub use types::*;
