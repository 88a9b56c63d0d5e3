// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use tracing::trace;

use super::{parse_state_id, parse_uint, state_request, write_uint, Endpoint};
use crate::error::ApiError;
use crate::model::{FinalityCheckpoints, Fork, Randao, StateRoot};
use crate::request::{FieldSchema, FieldSpec, Query, RequestSchema, WireRequest};
use crate::routes::Route;
use crate::types::{Epoch, StateId};

const EPOCH: &str = "epoch";

/// A state id with an optional epoch in the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateEpochArgs {
    pub state_id: StateId,
    pub epoch: Option<Epoch>,
}

impl StateEpochArgs {
    pub(crate) const SCHEMA: RequestSchema =
        RequestSchema::state_with_query(&[FieldSpec {
            name: EPOCH,
            schema: FieldSchema::Uint,
        }]);

    pub(crate) fn write(&self) -> WireRequest {
        let mut query = Query::new();
        write_uint(&mut query, EPOCH, self.epoch);
        state_request(&self.state_id).with_query(query)
    }

    pub(crate) fn parse(wire: &WireRequest) -> Result<Self, ApiError> {
        Ok(Self {
            state_id: parse_state_id(wire)?,
            epoch: parse_uint(&wire.query, EPOCH)?,
        })
    }
}

/// Implements an operation addressed by the state id alone.
macro_rules! state_endpoint {
    ($(#[$meta:meta])* $name:ident, $template:literal, $data:ty) => {
        $(#[$meta])*
        pub struct $name;

        impl Endpoint for $name {
            const ROUTE: Route = Route::get($template);
            const REQUEST_SCHEMA: RequestSchema = RequestSchema::STATE;

            type Args = StateId;
            type Data = $data;

            fn write_req(state_id: &StateId) -> WireRequest {
                trace!(route = $template, %state_id, "Writing request");
                state_request(state_id)
            }

            fn parse_req(wire: &WireRequest) -> Result<StateId, ApiError> {
                parse_state_id(wire)
            }
        }
    };
}

state_endpoint!(
    /// Root of a state.
    GetStateRoot,
    "/eth/v1/beacon/states/{state_id}/root",
    StateRoot
);

state_endpoint!(
    /// Fork object of a state.
    GetStateFork,
    "/eth/v1/beacon/states/{state_id}/fork",
    Fork
);

state_endpoint!(
    /// Justified and finalized checkpoints of a state.
    GetStateFinalityCheckpoints,
    "/eth/v1/beacon/states/{state_id}/finality_checkpoints",
    FinalityCheckpoints
);

/// RANDAO mix of a state, for the state's epoch unless one is given.
pub struct GetStateRandao;

impl Endpoint for GetStateRandao {
    const ROUTE: Route =
        Route::get("/eth/v1/beacon/states/{state_id}/randao");
    const REQUEST_SCHEMA: RequestSchema = StateEpochArgs::SCHEMA;

    type Args = StateEpochArgs;
    type Data = Randao;

    fn write_req(args: &StateEpochArgs) -> WireRequest {
        trace!(
            state_id = %args.state_id,
            epoch = ?args.epoch,
            "Writing randao request"
        );
        args.write()
    }

    fn parse_req(wire: &WireRequest) -> Result<StateEpochArgs, ApiError> {
        StateEpochArgs::parse(wire)
    }
}
