// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

mod common;

use common::*;
use proptest::collection::vec;
use proptest::prelude::*;
use ssz::Encode;
use state_api::codec::binary::decode;
use state_api::codec::{JsonCodec, Payload};
use state_api::decimal::{from_decimal_string, to_decimal_string};
use state_api::endpoints::committees::CommitteesArgs;
use state_api::endpoints::state::StateEpochArgs;
use state_api::endpoints::validators::{
    ValidatorArgs, ValidatorIdsArgs, ValidatorsArgs,
};
use state_api::types::{StateId, ValidatorFilters, ValidatorId};
use state_api::{
    ApiRequest, ExecutionMeta, Query, ResponseEnvelope, ResponseFormat,
    WireRequest,
};
use url::Url;

fn assert_wire_round_trip(request: &ApiRequest) -> Result<(), TestCaseError> {
    let wire = request.write();
    let parsed = ApiRequest::parse(request.operation(), &wire)?;
    prop_assert_eq!(&parsed, request);
    Ok(())
}

/// Sends the request through a rendered URL, the way a server sees it.
fn assert_url_round_trip(request: &ApiRequest) -> Result<(), TestCaseError> {
    let operation = request.operation();
    let wire = request.write();
    let base = Url::parse("http://localhost:5052").expect("valid url");
    let url = wire.to_url(&operation.route(), &base)?;

    let (found, params) =
        state_api::Operation::lookup(operation.route().method, url.path())
            .ok_or_else(|| TestCaseError::fail(format!("no route for {url}")))?;
    prop_assert_eq!(found, operation);

    let received = WireRequest {
        params,
        query: Query::parse(url.query().unwrap_or_default()),
        body: wire.body,
    };
    let parsed = ApiRequest::parse(operation, &received)?;
    prop_assert_eq!(&parsed, request);
    Ok(())
}

fn assert_payload_round_trip<T: Payload>(
    value: &T,
) -> Result<(), TestCaseError> {
    prop_assert_eq!(&decode::<T>(&value.as_ssz_bytes())?, value);
    prop_assert_eq!(&T::from_json(&value.to_json())?, value);
    Ok(())
}

fn assert_envelope_round_trip<T: Payload>(
    data: T,
    meta: ExecutionMeta,
) -> Result<(), TestCaseError> {
    let envelope = ResponseEnvelope::new(data, meta);
    for format in [ResponseFormat::Json, ResponseFormat::Ssz] {
        let wire = envelope.encode(format)?;
        let decoded = ResponseEnvelope::<T>::decode(&wire)?;
        prop_assert_eq!(&decoded, &envelope);
    }
    Ok(())
}

fn arb_meta() -> impl Strategy<Value = ExecutionMeta> {
    (any::<bool>(), any::<bool>()).prop_map(|(execution_optimistic, finalized)| {
        ExecutionMeta {
            execution_optimistic,
            finalized,
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    #[test]
    fn decimal_round_trip(n in any::<u64>()) {
        prop_assert_eq!(from_decimal_string(&to_decimal_string(n)).unwrap(), n);
    }

    #[test]
    fn identifiers_round_trip(
        state_id in arb_state_id(),
        validator_id in arb_validator_id(),
    ) {
        prop_assert_eq!(StateId::parse(&state_id.to_string()).unwrap(), state_id);
        prop_assert_eq!(
            ValidatorId::parse(&validator_id.to_string()).unwrap(),
            validator_id
        );
    }

    #[test]
    fn state_requests_round_trip(
        state_id in arb_state_id(),
        epoch in proptest::option::of(any::<u64>()),
    ) {
        for request in [
            ApiRequest::GetStateRoot(state_id),
            ApiRequest::GetStateFork(state_id),
            ApiRequest::GetStateFinalityCheckpoints(state_id),
            ApiRequest::GetStateRandao(StateEpochArgs { state_id, epoch }),
            ApiRequest::GetEpochSyncCommittees(StateEpochArgs { state_id, epoch }),
        ] {
            assert_wire_round_trip(&request)?;
            assert_url_round_trip(&request)?;
        }
    }

    #[test]
    fn get_validator_requests_round_trip(
        state_id in arb_state_id(),
        validator_id in arb_validator_id(),
        ids in arb_list(arb_validator_id()),
        statuses in arb_list(arb_status()),
    ) {
        for request in [
            ApiRequest::GetStateValidators(ValidatorsArgs {
                state_id,
                filters: ValidatorFilters::new(ids.clone(), statuses),
            }),
            ApiRequest::GetStateValidator(ValidatorArgs {
                state_id,
                validator_id,
            }),
            ApiRequest::GetStateValidatorBalances(ValidatorIdsArgs {
                state_id,
                ids,
            }),
        ] {
            assert_wire_round_trip(&request)?;
            assert_url_round_trip(&request)?;
        }
    }

    #[test]
    fn post_validator_requests_round_trip(
        state_id in arb_state_id(),
        ids in arb_list(arb_validator_id()),
        statuses in arb_list(arb_status()),
    ) {
        for request in [
            ApiRequest::PostStateValidators(ValidatorsArgs {
                state_id,
                filters: ValidatorFilters::new(ids.clone(), statuses),
            }),
            ApiRequest::PostStateValidatorBalances(ValidatorIdsArgs {
                state_id,
                ids: ids.clone(),
            }),
            ApiRequest::PostStateValidatorIdentities(ValidatorIdsArgs {
                state_id,
                ids,
            }),
        ] {
            assert_wire_round_trip(&request)?;
            assert_url_round_trip(&request)?;
        }
    }

    #[test]
    fn committee_requests_round_trip(
        state_id in arb_state_id(),
        filters in arb_committees_filters(),
    ) {
        let request =
            ApiRequest::GetEpochCommittees(CommitteesArgs { state_id, filters });
        assert_wire_round_trip(&request)?;
        assert_url_round_trip(&request)?;
    }

    #[test]
    fn validator_payloads_round_trip(
        validators in vec(arb_validator_response(), 0..4),
        balances in vec(arb_balance(), 0..8),
        meta in arb_meta(),
    ) {
        assert_payload_round_trip(&validators)?;
        assert_payload_round_trip(&balances)?;
        assert_envelope_round_trip(validators, meta)?;
        assert_envelope_round_trip(balances, meta)?;
    }

    #[test]
    fn committee_payloads_round_trip(
        committees in vec(arb_committee(), 0..4),
        sync in arb_sync_committee(),
        meta in arb_meta(),
    ) {
        assert_payload_round_trip(&committees)?;
        assert_payload_round_trip(&sync)?;
        assert_envelope_round_trip(committees, meta)?;
        assert_envelope_round_trip(sync, meta)?;
    }

    #[test]
    fn state_payloads_round_trip(
        root in arb_state_root(),
        randao in arb_randao(),
        fork in arb_fork(),
        checkpoints in arb_finality_checkpoints(),
        meta in arb_meta(),
    ) {
        assert_payload_round_trip(&root)?;
        assert_payload_round_trip(&randao)?;
        assert_payload_round_trip(&fork)?;
        assert_payload_round_trip(&checkpoints)?;
        assert_envelope_round_trip(root, meta)?;
        assert_envelope_round_trip(randao, meta)?;
        assert_envelope_round_trip(fork, meta)?;
        assert_envelope_round_trip(checkpoints, meta)?;
    }

    #[test]
    fn identity_payloads_round_trip(
        identity in arb_identity(),
        identities in vec(arb_identity(), 0..6),
        meta in arb_meta(),
    ) {
        assert_payload_round_trip(&identity)?;
        assert_payload_round_trip(&identities)?;
        assert_envelope_round_trip(identity, meta)?;
        assert_envelope_round_trip(identities, meta)?;
    }

    #[test]
    fn truncated_binary_is_rejected(
        balances in vec(arb_balance(), 1..8),
        cut in 1usize..16,
    ) {
        let bytes = balances.as_ssz_bytes();
        let cut = cut.min(bytes.len());
        prop_assert!(
            decode::<Vec<state_api::model::ValidatorBalance>>(
                &bytes[..bytes.len() - cut]
            )
            .is_err()
        );
    }
}
