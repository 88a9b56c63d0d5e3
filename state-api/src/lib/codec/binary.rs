// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Compact binary encoding.
//!
//! Payloads use the SSZ layout of the `ssz` crate: fixed-size values are
//! packed in declaration order, every variable-size value is replaced in the
//! fixed part by a 4-byte little-endian offset and its bytes follow the
//! fixed part. Only the leaf types owned by this crate implement the
//! encoding by hand; containers get theirs from [`container!`].
//!
//! [`container!`]: super::container

use ssz::{Decode, Encode};

use super::schema::{Schema, TypeSchema};
use crate::error::DecodeError;
use crate::types::{Bytes, ValidatorStatus};

/// Decodes a binary payload, classifying failures as [`DecodeError`].
pub fn decode<T: Decode>(bytes: &[u8]) -> Result<T, DecodeError> {
    T::from_ssz_bytes(bytes).map_err(DecodeError::from)
}

impl From<ssz::DecodeError> for DecodeError {
    fn from(err: ssz::DecodeError) -> Self {
        use ssz::DecodeError as Ssz;

        let offset =
            |offset, reason| DecodeError::InvalidOffset { offset, reason };
        match err {
            Ssz::InvalidByteLength { len, expected }
            | Ssz::InvalidLengthPrefix { len, expected } => {
                DecodeError::length(expected, len)
            }
            Ssz::OffsetIntoFixedPortion(o) => {
                offset(o, "offset points into the fixed part")
            }
            Ssz::OffsetSkipsVariableBytes(o) => {
                offset(o, "first offset must follow the fixed part")
            }
            Ssz::OffsetsAreDecreasing(o) => {
                offset(o, "offsets must not decrease")
            }
            Ssz::OffsetOutOfBounds(o) => offset(o, "offset is out of bounds"),
            Ssz::BytesInvalid(reason) => DecodeError::InvalidBytes(reason),
            other => DecodeError::Malformed(format!("{other:?}")),
        }
    }
}

impl<const N: usize> Encode for Bytes<N> {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        N
    }

    fn ssz_bytes_len(&self) -> usize {
        N
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.as_bytes());
    }
}

impl<const N: usize> Decode for Bytes<N> {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        N
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, ssz::DecodeError> {
        Self::from_slice(bytes).map_err(|_| {
            ssz::DecodeError::InvalidByteLength {
                len: bytes.len(),
                expected: N,
            }
        })
    }
}

impl Encode for ValidatorStatus {
    fn is_ssz_fixed_len() -> bool {
        false
    }

    fn ssz_bytes_len(&self) -> usize {
        self.as_str().len()
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.as_str().as_bytes());
    }
}

impl Decode for ValidatorStatus {
    fn is_ssz_fixed_len() -> bool {
        false
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, ssz::DecodeError> {
        let literal = std::str::from_utf8(bytes).map_err(|e| {
            ssz::DecodeError::BytesInvalid(format!("invalid utf-8: {e}"))
        })?;
        literal.parse().map_err(|e: DecodeError| {
            ssz::DecodeError::BytesInvalid(e.to_string())
        })
    }
}

impl Schema for u64 {
    const SCHEMA: TypeSchema = TypeSchema::Uint64;
}

impl Schema for bool {
    const SCHEMA: TypeSchema = TypeSchema::Boolean;
}

impl<const N: usize> Schema for Bytes<N> {
    const SCHEMA: TypeSchema = TypeSchema::ByteVector(N);
}

impl Schema for ValidatorStatus {
    const SCHEMA: TypeSchema = TypeSchema::Utf8String;
}

impl<T: Schema> Schema for Vec<T> {
    const SCHEMA: TypeSchema = TypeSchema::List(&T::SCHEMA);
}
