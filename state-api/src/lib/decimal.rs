// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Canonical decimal strings for unsigned 64-bit integers.
//!
//! JSON numbers lose precision above 2^53 - 1 in most clients, so every
//! `u64` crossing a text boundary is rendered as a decimal string. The form
//! is canonical: no sign, no leading zeros (except the literal `"0"`), so
//! that a decimal value and a `0x`-prefixed hex identifier can never be
//! confused when they share a field or an array.

use tracing::debug;

use crate::error::ApiError;

/// Renders `n` as a canonical decimal string.
pub fn to_decimal_string(n: u64) -> String {
    n.to_string()
}

/// Parses a canonical decimal string into a `u64`.
///
/// Rejects empty strings, anything other than ASCII digits (signs included),
/// leading zeros other than the literal `"0"`, and values above `u64::MAX`.
pub fn from_decimal_string(s: &str) -> Result<u64, ApiError> {
    let reason = if s.is_empty() {
        Some("empty string")
    } else if !s.bytes().all(|b| b.is_ascii_digit()) {
        Some("non-digit character")
    } else if s.len() > 1 && s.starts_with('0') {
        Some("leading zero")
    } else {
        None
    };

    if let Some(reason) = reason {
        debug!(value = s, reason, "Rejected decimal literal");
        return Err(malformed(s, reason));
    }

    s.parse::<u64>().map_err(|_| {
        debug!(value = s, "Decimal literal exceeds u64 range");
        malformed(s, "exceeds u64 range")
    })
}

fn malformed(value: &str, reason: &'static str) -> ApiError {
    ApiError::MalformedNumber {
        value: value.to_owned(),
        reason,
    }
}
