// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Error types for the state-query boundary layer.
//!
//! Every failure produced here is local and deterministic: parsing the same
//! input twice yields the same error. [`ApiError::status_code`] is the single
//! place where a failure is classified into the fixed status-code set the
//! transport answers with.

use http::StatusCode;
use thiserror::Error;

/// Errors raised while writing or parsing requests and encoding or decoding
/// responses.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A state or validator identifier does not match its literal grammar.
    #[error("Malformed {kind} '{value}': {reason}")]
    MalformedIdentifier {
        kind: &'static str,
        value: String,
        reason: String,
    },

    /// A decimal integer literal is not a canonical unsigned 64-bit value.
    #[error("Malformed number '{value}': {reason}")]
    MalformedNumber { value: String, reason: &'static str },

    /// A wire request does not satisfy the declared field schema.
    #[error("Schema violation on '{field}': {reason}")]
    SchemaViolation { field: String, reason: String },

    /// No operation is registered under the given name.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// A response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Error during JSON serialization or deserialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    pub(crate) fn schema(
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::SchemaViolation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Maps the error onto the status code the transport should answer with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedIdentifier { .. }
            | Self::MalformedNumber { .. }
            | Self::SchemaViolation { .. }
            | Self::Decode(_)
            | Self::Json(_) => StatusCode::BAD_REQUEST,
            Self::UnknownOperation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Failures while decoding a JSON or binary payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Invalid length: expected {expected} bytes, got {found}")]
    InvalidLength { expected: usize, found: usize },

    #[error("Invalid offset {offset}: {reason}")]
    InvalidOffset { offset: usize, reason: &'static str },

    /// Bytes of the right length that do not form a valid value
    #[error("Invalid bytes: {0}")]
    InvalidBytes(String),

    /// Any other malformed binary encoding
    #[error("Malformed binary encoding: {0}")]
    Malformed(String),

    #[error("Invalid hex string '{0}'")]
    InvalidHex(String),

    #[error("Unexpected JSON value: expected {0}")]
    UnexpectedJsonType(&'static str),

    #[error("Missing field '{0}'")]
    MissingField(&'static str),

    #[error("Malformed number '{0}'")]
    MalformedNumber(String),

    #[error("Unknown validator status '{0}'")]
    InvalidStatus(String),

    #[error("Invalid header {name}: {value}")]
    InvalidHeader { name: &'static str, value: String },
}

impl DecodeError {
    pub(crate) fn length(expected: usize, found: usize) -> Self {
        Self::InvalidLength { expected, found }
    }
}
