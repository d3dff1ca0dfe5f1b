// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-session auth tokens (see spec §3.1, §5.2).
//!
//! Each session descriptor carries a random token that callers must echo back
//! as `params._token` on every request. Comparison must run in constant time
//! so a timing side channel can't be used to brute-force the token.

use rand::RngCore;

/// Number of random bytes in a generated token (128 bits), hex-encoded to 32 chars.
const TOKEN_BYTES: usize = 16;

/// Generate a fresh random token, hex-encoded.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Compare two tokens in constant time with respect to their contents.
///
/// Unequal lengths short-circuit (length isn't secret); equal-length
/// comparison never branches on byte value.
pub fn tokens_equal(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
