// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Human-readable encoding.
//!
//! - `uint64` is a canonical decimal string (a JSON integer is accepted on
//!   decode)
//! - byte vectors are `0x`-prefixed lowercase hex
//! - container fields keep their snake_case names

use serde_json::{Map, Value};

use super::schema::Schema;
use crate::decimal::{from_decimal_string, to_decimal_string};
use crate::error::DecodeError;
use crate::types::{Bytes, ValidatorStatus};

/// JSON codec derived from a type's [`Schema`].
pub trait JsonCodec: Schema + Sized {
    fn to_json(&self) -> Value;

    fn from_json(value: &Value) -> Result<Self, DecodeError>;
}

/// Fetches and decodes a container field.
pub fn decode_field<T: JsonCodec>(
    object: &Map<String, Value>,
    name: &'static str,
) -> Result<T, DecodeError> {
    object
        .get(name)
        .ok_or(DecodeError::MissingField(name))
        .and_then(T::from_json)
}

fn as_str<'a>(
    value: &'a Value,
    expected: &'static str,
) -> Result<&'a str, DecodeError> {
    value
        .as_str()
        .ok_or(DecodeError::UnexpectedJsonType(expected))
}

impl JsonCodec for u64 {
    fn to_json(&self) -> Value {
        Value::String(to_decimal_string(*self))
    }

    fn from_json(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::String(s) => from_decimal_string(s)
                .map_err(|_| DecodeError::MalformedNumber(s.clone())),
            Value::Number(n) => n
                .as_u64()
                .ok_or_else(|| DecodeError::MalformedNumber(n.to_string())),
            _ => Err(DecodeError::UnexpectedJsonType("uint64")),
        }
    }
}

impl JsonCodec for bool {
    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_json(value: &Value) -> Result<Self, DecodeError> {
        value
            .as_bool()
            .ok_or(DecodeError::UnexpectedJsonType("boolean"))
    }
}

impl<const N: usize> JsonCodec for Bytes<N> {
    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }

    fn from_json(value: &Value) -> Result<Self, DecodeError> {
        as_str(value, "hex string")?.parse()
    }
}

impl JsonCodec for ValidatorStatus {
    fn to_json(&self) -> Value {
        Value::String(self.as_str().to_owned())
    }

    fn from_json(value: &Value) -> Result<Self, DecodeError> {
        as_str(value, "validator status")?.parse()
    }
}

impl<T: JsonCodec> JsonCodec for Vec<T> {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(JsonCodec::to_json).collect())
    }

    fn from_json(value: &Value) -> Result<Self, DecodeError> {
        value
            .as_array()
            .ok_or(DecodeError::UnexpectedJsonType("array"))?
            .iter()
            .map(T::from_json)
            .collect()
    }
}
