// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use tracing::trace;

use super::state::StateEpochArgs;
use super::{parse_state_id, parse_uint, state_request, write_uint, Endpoint};
use crate::error::ApiError;
use crate::model::{EpochCommittee, EpochSyncCommittee};
use crate::request::{FieldSchema, FieldSpec, Query, RequestSchema, WireRequest};
use crate::routes::Route;
use crate::types::{CommitteesFilters, StateId};

const EPOCH: &str = "epoch";
const INDEX: &str = "index";
const SLOT: &str = "slot";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitteesArgs {
    pub state_id: StateId,
    pub filters: CommitteesFilters,
}

/// Attestation committees of an epoch.
pub struct GetEpochCommittees;

impl Endpoint for GetEpochCommittees {
    const ROUTE: Route =
        Route::get("/eth/v1/beacon/states/{state_id}/committees");
    const REQUEST_SCHEMA: RequestSchema = RequestSchema::state_with_query(&[
        FieldSpec {
            name: EPOCH,
            schema: FieldSchema::Uint,
        },
        FieldSpec {
            name: INDEX,
            schema: FieldSchema::Uint,
        },
        FieldSpec {
            name: SLOT,
            schema: FieldSchema::Uint,
        },
    ]);

    type Args = CommitteesArgs;
    type Data = Vec<EpochCommittee>;

    fn write_req(args: &CommitteesArgs) -> WireRequest {
        trace!(
            state_id = %args.state_id,
            filters = ?args.filters,
            "Writing committees query"
        );
        let CommitteesFilters { epoch, index, slot } = args.filters;
        let mut query = Query::new();
        write_uint(&mut query, EPOCH, epoch);
        write_uint(&mut query, INDEX, index);
        write_uint(&mut query, SLOT, slot);
        state_request(&args.state_id).with_query(query)
    }

    fn parse_req(wire: &WireRequest) -> Result<CommitteesArgs, ApiError> {
        Ok(CommitteesArgs {
            state_id: parse_state_id(wire)?,
            filters: CommitteesFilters {
                epoch: parse_uint(&wire.query, EPOCH)?,
                index: parse_uint(&wire.query, INDEX)?,
                slot: parse_uint(&wire.query, SLOT)?,
            },
        })
    }
}

/// Sync committee of an epoch.
pub struct GetEpochSyncCommittees;

impl Endpoint for GetEpochSyncCommittees {
    const ROUTE: Route =
        Route::get("/eth/v1/beacon/states/{state_id}/sync_committees");
    const REQUEST_SCHEMA: RequestSchema = StateEpochArgs::SCHEMA;

    type Args = StateEpochArgs;
    type Data = EpochSyncCommittee;

    fn write_req(args: &StateEpochArgs) -> WireRequest {
        trace!(
            state_id = %args.state_id,
            epoch = ?args.epoch,
            "Writing sync committees request"
        );
        args.write()
    }

    fn parse_req(wire: &WireRequest) -> Result<StateEpochArgs, ApiError> {
        StateEpochArgs::parse(wire)
    }
}
