// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Per-operation request codecs.
//!
//! Each operation is a marker type implementing [`Endpoint`]: its route,
//! the declared request schema, the typed arguments, the response payload
//! and the two directions of the request mapping. `parse_req` is the
//! inverse of `write_req` and assumes the wire request already passed
//! [`RequestSchema::validate`].

pub mod committees;
pub mod state;
pub mod validators;

use std::fmt::Debug;

use serde_json::Value;

use crate::codec::Payload;
use crate::decimal::{from_decimal_string, to_decimal_string};
use crate::error::{ApiError, DecodeError};
use crate::request::{Query, RequestSchema, WireRequest};
use crate::routes::Route;
use crate::types::{StateId, ValidatorId, ValidatorStatus};

pub const STATE_ID: &str = "state_id";
pub const VALIDATOR_ID: &str = "validator_id";

/// Request and response codecs of one operation.
pub trait Endpoint {
    const ROUTE: Route;
    const REQUEST_SCHEMA: RequestSchema;

    /// Typed arguments of a call.
    type Args: Clone + PartialEq + Eq + Debug + Send + Sync + 'static;
    /// `data` payload of a successful response.
    type Data: Payload;

    fn write_req(args: &Self::Args) -> WireRequest;

    fn parse_req(wire: &WireRequest) -> Result<Self::Args, ApiError>;
}

pub(crate) fn state_request(state_id: &StateId) -> WireRequest {
    WireRequest::default().with_param(STATE_ID, state_id.to_string())
}

pub(crate) fn parse_state_id(wire: &WireRequest) -> Result<StateId, ApiError> {
    StateId::parse(wire.param(STATE_ID)?)
}

pub(crate) fn write_uint(query: &mut Query, key: &str, value: Option<u64>) {
    if let Some(value) = value {
        query.push(key, to_decimal_string(value));
    }
}

pub(crate) fn parse_uint(
    query: &Query,
    key: &str,
) -> Result<Option<u64>, ApiError> {
    query.get(key).map(from_decimal_string).transpose()
}

pub(crate) fn parse_ids(values: Vec<&str>) -> Result<Vec<ValidatorId>, ApiError> {
    values.into_iter().map(ValidatorId::parse).collect()
}

pub(crate) fn parse_statuses(
    field: &str,
    values: Vec<&str>,
) -> Result<Vec<ValidatorStatus>, ApiError> {
    values
        .into_iter()
        .map(|s| {
            s.parse()
                .map_err(|e: DecodeError| ApiError::schema(field, e.to_string()))
        })
        .collect()
}

pub(crate) fn ids_to_json(ids: &[ValidatorId]) -> Value {
    Value::Array(ids.iter().map(|id| Value::String(id.to_string())).collect())
}

/// Reads a JSON array of validator ids, as found in POST bodies.
pub(crate) fn ids_from_json(
    field: &str,
    value: &Value,
) -> Result<Vec<ValidatorId>, ApiError> {
    value
        .as_array()
        .ok_or_else(|| ApiError::schema(field, "expected an array"))?
        .iter()
        .map(ValidatorId::from_json)
        .collect()
}
