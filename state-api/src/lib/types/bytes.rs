// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::fmt;
use std::str::FromStr;

use crate::error::DecodeError;

/// Fixed-length byte vector.
///
/// Displayed as a `0x`-prefixed lowercase hex string. Parsing requires the
/// prefix and exactly `2 * N` hex digits, in either case.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bytes<const N: usize>(pub [u8; N]);

/// 32-byte hash root.
pub type Root = Bytes<32>;
/// 4-byte fork version.
pub type Version = Bytes<4>;
/// 48-byte compressed BLS public key.
pub type BlsPublicKey = Bytes<48>;

impl<const N: usize> Bytes<N> {
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// Copies `bytes` into a new vector, failing on a length mismatch.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        let array: [u8; N] = bytes
            .try_into()
            .map_err(|_| DecodeError::length(N, bytes.len()))?;
        Ok(Self(array))
    }

    /// Length in characters of the textual form, prefix included.
    pub const fn hex_len() -> usize {
        2 + 2 * N
    }
}

impl<const N: usize> From<[u8; N]> for Bytes<N> {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes)
    }
}

impl<const N: usize> fmt::Display for Bytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl<const N: usize> fmt::Debug for Bytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<const N: usize> FromStr for Bytes<N> {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .ok_or_else(|| DecodeError::InvalidHex(s.to_owned()))?;
        if digits.len() != 2 * N {
            return Err(DecodeError::InvalidHex(s.to_owned()));
        }
        let mut bytes = [0u8; N];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|_| DecodeError::InvalidHex(s.to_owned()))?;
        Ok(Self(bytes))
    }
}
