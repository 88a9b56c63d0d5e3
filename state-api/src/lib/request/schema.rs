// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Field-level request validation.
//!
//! A [`RequestSchema`] declares, for every wire location of an operation,
//! which fields exist and what shape they take. The transport runs
//! [`RequestSchema::validate`] before handing the request to the operation's
//! parser, which can then assume well-shaped input.

use std::fmt;

use serde_json::Value;
use tracing::debug;

use super::WireRequest;
use crate::decimal::from_decimal_string;
use crate::error::ApiError;

/// Shape of a single request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSchema {
    /// A non-empty string that must be present
    StringRequired,
    /// An unsigned 64-bit integer
    Uint,
    /// A list whose items are unsigned integers or strings
    UintOrStringArray,
    StringArray,
    /// Any JSON object; members are checked by the operation parser
    Object,
    UintOrString,
}

impl fmt::Display for FieldSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StringRequired => "required string",
            Self::Uint => "unsigned integer",
            Self::UintOrStringArray => "array of unsigned integer or string",
            Self::StringArray => "array of string",
            Self::Object => "object",
            Self::UintOrString => "unsigned integer or string",
        };
        f.write_str(name)
    }
}

/// A named field and its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub schema: FieldSchema,
}

/// Declared request shape of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestSchema {
    pub params: &'static [FieldSpec],
    pub query: &'static [FieldSpec],
    pub body: Option<FieldSchema>,
}

const STATE_ID: FieldSpec = FieldSpec {
    name: "state_id",
    schema: FieldSchema::StringRequired,
};

impl RequestSchema {
    /// Schema of operations addressed by state id alone.
    pub const STATE: Self = Self {
        params: &[STATE_ID],
        query: &[],
        body: None,
    };

    pub const fn state_with_query(query: &'static [FieldSpec]) -> Self {
        Self {
            params: &[STATE_ID],
            query,
            body: None,
        }
    }

    pub const fn state_with_body(body: FieldSchema) -> Self {
        Self {
            params: &[STATE_ID],
            query: &[],
            body: Some(body),
        }
    }

    /// Checks every declared field of `wire`.
    ///
    /// Path parameters must all be present. Query fields are optional, but
    /// scalar ones may appear at most once. A list field given as a single
    /// empty value is an empty list; any other empty item is rejected. A body is accepted only when one
    /// is declared.
    pub fn validate(&self, wire: &WireRequest) -> Result<(), ApiError> {
        for spec in self.params {
            let value = wire.param(spec.name).inspect_err(|_| {
                debug!(field = spec.name, "Missing path parameter");
            })?;
            check_scalar(spec, value)?;
        }

        for spec in self.query {
            let values: Vec<&str> = wire.query.get_all(spec.name).collect();
            if values.is_empty() {
                continue;
            }
            if is_list(spec.schema) {
                // A lone empty value is the empty list.
                if values == [""] {
                    continue;
                }
                for value in values.iter().flat_map(|v| v.split(',')) {
                    if value.is_empty() {
                        return Err(violation(spec.name, "empty list item"));
                    }
                }
            } else {
                if values.len() > 1 {
                    return Err(violation(spec.name, "expected a single value"));
                }
                check_scalar(spec, values[0])?;
            }
        }

        match (&self.body, &wire.body) {
            (None, Some(_)) => Err(violation("body", "unexpected body")),
            (Some(schema), Some(body)) => check_json("body", *schema, body),
            (_, None) => Ok(()),
        }
    }
}

fn is_list(schema: FieldSchema) -> bool {
    matches!(
        schema,
        FieldSchema::UintOrStringArray | FieldSchema::StringArray
    )
}

fn check_scalar(spec: &FieldSpec, value: &str) -> Result<(), ApiError> {
    match spec.schema {
        FieldSchema::StringRequired if value.is_empty() => {
            Err(violation(spec.name, "empty string"))
        }
        FieldSchema::Uint => from_decimal_string(value)
            .map(|_| ())
            .map_err(|e| violation(spec.name, e.to_string())),
        FieldSchema::Object => {
            Err(violation(spec.name, "object is not allowed here"))
        }
        _ => Ok(()),
    }
}

fn is_uint(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_u64(),
        Value::String(s) => from_decimal_string(s).is_ok(),
        _ => false,
    }
}

fn check_json(
    field: &str,
    schema: FieldSchema,
    value: &Value,
) -> Result<(), ApiError> {
    let valid = match schema {
        FieldSchema::StringRequired => {
            value.as_str().is_some_and(|s| !s.is_empty())
        }
        FieldSchema::Uint => is_uint(value),
        FieldSchema::UintOrString => value.is_string() || is_uint(value),
        FieldSchema::UintOrStringArray => {
            value.as_array().is_some_and(|items| {
                items.iter().all(|i| i.is_string() || is_uint(i))
            })
        }
        FieldSchema::StringArray => value
            .as_array()
            .is_some_and(|items| items.iter().all(Value::is_string)),
        FieldSchema::Object => value.is_object(),
    };
    if valid {
        Ok(())
    } else {
        Err(violation(field, format!("expected {schema}")))
    }
}

fn violation(field: &str, reason: impl Into<String>) -> ApiError {
    let reason = reason.into();
    debug!(field, reason = %reason, "Schema violation");
    ApiError::schema(field, reason)
}
