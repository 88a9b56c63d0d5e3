// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Validator queries.
//!
//! Filtered listings exist as a GET operation carrying the filters in the
//! query and a POST operation carrying them in the body. Both sides parse
//! to the same argument type so that one handler can serve either.
//!
//! A GET query cannot carry an empty list, so an explicitly empty filter is
//! written as an absent one there. The POST body keeps the distinction.

use serde_json::{Map, Value};
use tracing::trace;

use super::{
    ids_from_json, ids_to_json, parse_ids, parse_state_id, parse_statuses,
    state_request, Endpoint, STATE_ID, VALIDATOR_ID,
};
use crate::error::ApiError;
use crate::model::{ValidatorBalance, ValidatorIdentity, ValidatorResponse};
use crate::request::{FieldSchema, FieldSpec, Query, RequestSchema, WireRequest};
use crate::routes::Route;
use crate::types::{StateId, ValidatorFilters, ValidatorId, ValidatorStatus};

const ID: &str = "id";
const STATUS: &str = "status";
const IDS: &str = "ids";
const STATUSES: &str = "statuses";

const ID_FIELD: FieldSpec = FieldSpec {
    name: ID,
    schema: FieldSchema::UintOrStringArray,
};

/// Validator listing filtered by id and status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorsArgs {
    pub state_id: StateId,
    pub filters: ValidatorFilters,
}

/// A single validator of a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorArgs {
    pub state_id: StateId,
    pub validator_id: ValidatorId,
}

/// Per-validator listing restricted to the given ids, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorIdsArgs {
    pub state_id: StateId,
    pub ids: Option<Vec<ValidatorId>>,
}

fn statuses_to_json(statuses: &[ValidatorStatus]) -> Value {
    Value::Array(
        statuses
            .iter()
            .map(|s| Value::String(s.as_str().to_owned()))
            .collect(),
    )
}

fn statuses_from_json(value: &Value) -> Result<Vec<ValidatorStatus>, ApiError> {
    let items = value
        .as_array()
        .ok_or_else(|| ApiError::schema(STATUSES, "expected an array"))?;
    let literals = items
        .iter()
        .map(|item| {
            item.as_str()
                .ok_or_else(|| ApiError::schema(STATUSES, "expected a string"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    parse_statuses(STATUSES, literals)
}

fn write_id_query(query: &mut Query, ids: Option<&[ValidatorId]>) {
    if let Some(ids) = ids {
        query.push_list(ID, ids);
    }
}

fn parse_id_query(query: &Query) -> Result<Option<Vec<ValidatorId>>, ApiError> {
    query.get_list(ID).map(parse_ids).transpose()
}

/// Lists validators, filters in the query.
pub struct GetStateValidators;

impl Endpoint for GetStateValidators {
    const ROUTE: Route =
        Route::get("/eth/v1/beacon/states/{state_id}/validators");
    const REQUEST_SCHEMA: RequestSchema = RequestSchema::state_with_query(&[
        ID_FIELD,
        FieldSpec {
            name: STATUS,
            schema: FieldSchema::StringArray,
        },
    ]);

    type Args = ValidatorsArgs;
    type Data = Vec<ValidatorResponse>;

    fn write_req(args: &ValidatorsArgs) -> WireRequest {
        trace!(
            state_id = %args.state_id,
            filters = ?args.filters,
            "Writing validators query"
        );
        let mut query = Query::new();
        write_id_query(&mut query, args.filters.ids.as_deref());
        if let Some(statuses) = &args.filters.statuses {
            query.push_list(STATUS, statuses);
        }
        state_request(&args.state_id).with_query(query)
    }

    fn parse_req(wire: &WireRequest) -> Result<ValidatorsArgs, ApiError> {
        let statuses = wire
            .query
            .get_list(STATUS)
            .map(|values| parse_statuses(STATUS, values))
            .transpose()?;
        Ok(ValidatorsArgs {
            state_id: parse_state_id(wire)?,
            filters: ValidatorFilters::new(
                parse_id_query(&wire.query)?,
                statuses,
            ),
        })
    }
}

/// Lists validators, filters in the body.
pub struct PostStateValidators;

impl Endpoint for PostStateValidators {
    const ROUTE: Route =
        Route::post("/eth/v1/beacon/states/{state_id}/validators");
    const REQUEST_SCHEMA: RequestSchema =
        RequestSchema::state_with_body(FieldSchema::Object);

    type Args = ValidatorsArgs;
    type Data = Vec<ValidatorResponse>;

    fn write_req(args: &ValidatorsArgs) -> WireRequest {
        trace!(
            state_id = %args.state_id,
            filters = ?args.filters,
            "Writing validators body"
        );
        let mut body = Map::new();
        if let Some(ids) = &args.filters.ids {
            body.insert(IDS.to_owned(), ids_to_json(ids));
        }
        if let Some(statuses) = &args.filters.statuses {
            body.insert(STATUSES.to_owned(), statuses_to_json(statuses));
        }
        state_request(&args.state_id).with_body(Value::Object(body))
    }

    fn parse_req(wire: &WireRequest) -> Result<ValidatorsArgs, ApiError> {
        let state_id = parse_state_id(wire)?;
        let Some(body) = &wire.body else {
            return Ok(ValidatorsArgs {
                state_id,
                filters: ValidatorFilters::default(),
            });
        };
        let body = body
            .as_object()
            .ok_or_else(|| ApiError::schema("body", "expected an object"))?;

        let present = |key: &str| body.get(key).filter(|v| !v.is_null());
        let ids = present(IDS).map(|v| ids_from_json(IDS, v)).transpose()?;
        let statuses = present(STATUSES).map(statuses_from_json).transpose()?;
        Ok(ValidatorsArgs {
            state_id,
            filters: ValidatorFilters::new(ids, statuses),
        })
    }
}

/// A single validator by index or public key.
pub struct GetStateValidator;

impl Endpoint for GetStateValidator {
    const ROUTE: Route =
        Route::get("/eth/v1/beacon/states/{state_id}/validators/{validator_id}");
    const REQUEST_SCHEMA: RequestSchema = RequestSchema {
        params: &[
            FieldSpec {
                name: STATE_ID,
                schema: FieldSchema::StringRequired,
            },
            FieldSpec {
                name: VALIDATOR_ID,
                schema: FieldSchema::StringRequired,
            },
        ],
        query: &[],
        body: None,
    };

    type Args = ValidatorArgs;
    type Data = ValidatorResponse;

    fn write_req(args: &ValidatorArgs) -> WireRequest {
        trace!(
            state_id = %args.state_id,
            validator_id = %args.validator_id,
            "Writing validator request"
        );
        state_request(&args.state_id)
            .with_param(VALIDATOR_ID, args.validator_id.to_string())
    }

    fn parse_req(wire: &WireRequest) -> Result<ValidatorArgs, ApiError> {
        Ok(ValidatorArgs {
            state_id: parse_state_id(wire)?,
            validator_id: ValidatorId::parse(wire.param(VALIDATOR_ID)?)?,
        })
    }
}

/// Balances, ids in the query.
pub struct GetStateValidatorBalances;

impl Endpoint for GetStateValidatorBalances {
    const ROUTE: Route =
        Route::get("/eth/v1/beacon/states/{state_id}/validator_balances");
    const REQUEST_SCHEMA: RequestSchema =
        RequestSchema::state_with_query(&[ID_FIELD]);

    type Args = ValidatorIdsArgs;
    type Data = Vec<ValidatorBalance>;

    fn write_req(args: &ValidatorIdsArgs) -> WireRequest {
        trace!(
            state_id = %args.state_id,
            ids = ?args.ids,
            "Writing balances query"
        );
        let mut query = Query::new();
        write_id_query(&mut query, args.ids.as_deref());
        state_request(&args.state_id).with_query(query)
    }

    fn parse_req(wire: &WireRequest) -> Result<ValidatorIdsArgs, ApiError> {
        Ok(ValidatorIdsArgs {
            state_id: parse_state_id(wire)?,
            ids: parse_id_query(&wire.query)?,
        })
    }
}

fn write_id_body(route: &'static str, args: &ValidatorIdsArgs) -> WireRequest {
    trace!(
        route,
        state_id = %args.state_id,
        ids = ?args.ids,
        "Writing ids body"
    );
    let wire = state_request(&args.state_id);
    match &args.ids {
        Some(ids) => wire.with_body(ids_to_json(ids)),
        None => wire,
    }
}

fn parse_id_body(wire: &WireRequest) -> Result<ValidatorIdsArgs, ApiError> {
    Ok(ValidatorIdsArgs {
        state_id: parse_state_id(wire)?,
        ids: wire
            .body
            .as_ref()
            .filter(|v| !v.is_null())
            .map(|v| ids_from_json("body", v))
            .transpose()?,
    })
}

/// Balances, ids as a bare array body.
pub struct PostStateValidatorBalances;

impl Endpoint for PostStateValidatorBalances {
    const ROUTE: Route =
        Route::post("/eth/v1/beacon/states/{state_id}/validator_balances");
    const REQUEST_SCHEMA: RequestSchema =
        RequestSchema::state_with_body(FieldSchema::UintOrStringArray);

    type Args = ValidatorIdsArgs;
    type Data = Vec<ValidatorBalance>;

    fn write_req(args: &ValidatorIdsArgs) -> WireRequest {
        write_id_body(Self::ROUTE.template, args)
    }

    fn parse_req(wire: &WireRequest) -> Result<ValidatorIdsArgs, ApiError> {
        parse_id_body(wire)
    }
}

/// Index, public key and activation epoch of validators.
pub struct PostStateValidatorIdentities;

impl Endpoint for PostStateValidatorIdentities {
    const ROUTE: Route =
        Route::post("/eth/v1/beacon/states/{state_id}/validator_identities");
    const REQUEST_SCHEMA: RequestSchema =
        RequestSchema::state_with_body(FieldSchema::UintOrStringArray);

    type Args = ValidatorIdsArgs;
    type Data = Vec<ValidatorIdentity>;

    fn write_req(args: &ValidatorIdsArgs) -> WireRequest {
        write_id_body(Self::ROUTE.template, args)
    }

    fn parse_req(wire: &WireRequest) -> Result<ValidatorIdsArgs, ApiError> {
        parse_id_body(wire)
    }
}
