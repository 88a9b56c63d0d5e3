// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::collections::BTreeMap;

use assert_matches::assert_matches;
use http::header::CONTENT_TYPE;
use http::StatusCode;
use serde_json::{json, Value};
use ssz::Encode;
use state_api::codec::binary::decode;
use state_api::endpoints::validators::{ValidatorIdsArgs, ValidatorsArgs};
use state_api::model::ValidatorBalance;
use state_api::response::{EXECUTION_OPTIMISTIC_HEADER, FINALIZED_HEADER};
use state_api::types::{
    StateAlias, StateId, ValidatorFilters, ValidatorId, ValidatorStatus,
};
use state_api::{
    ApiError, ApiRequest, ExecutionMeta, Method, Operation, Query,
    ResponseEnvelope, ResponseFormat, WireRequest,
};

const PUBKEY: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const BAD_ROOT: &str =
    "0xZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZ";

fn balances() -> Vec<ValidatorBalance> {
    vec![ValidatorBalance {
        index: 7,
        balance: 32_000_000_000,
    }]
}

#[test]
fn filtered_validators_via_post() {
    let request = ApiRequest::PostStateValidators(ValidatorsArgs {
        state_id: StateId::Alias(StateAlias::Head),
        filters: ValidatorFilters::new(
            Some(vec![
                ValidatorId::Index(42),
                ValidatorId::parse(PUBKEY).unwrap(),
            ]),
            Some(vec![ValidatorStatus::ActiveOngoing]),
        ),
    });

    let wire = request.write();
    assert_eq!(wire.params["state_id"], "head");
    assert!(wire.query.is_empty());
    assert_eq!(
        wire.body,
        Some(json!({
            "ids": ["42", PUBKEY],
            "statuses": ["active_ongoing"],
        }))
    );

    let parsed =
        ApiRequest::parse(Operation::PostStateValidators, &wire).unwrap();
    assert_eq!(parsed, request);
}

#[test]
fn get_and_post_filters_agree() {
    let (op, params) = Operation::lookup(
        Method::Get,
        "/eth/v1/beacon/states/finalized/validators",
    )
    .unwrap();
    let get = WireRequest {
        params: params.clone(),
        query: Query::parse("id=42,1&status=active_ongoing"),
        body: None,
    };
    let get = ApiRequest::parse(op, &get).unwrap();

    let post = WireRequest {
        params,
        query: Query::new(),
        body: Some(json!({
            "ids": [42, "1"],
            "statuses": ["active_ongoing"],
        })),
    };
    let post =
        ApiRequest::parse(Operation::PostStateValidators, &post).unwrap();

    let ApiRequest::GetStateValidators(get) = get else {
        panic!("unexpected operation");
    };
    let ApiRequest::PostStateValidators(post) = post else {
        panic!("unexpected operation");
    };
    assert_eq!(get, post);
    assert_eq!(
        get.filters.ids,
        Some(vec![ValidatorId::Index(42), ValidatorId::Index(1)])
    );
}

#[test]
fn balances_render_as_decimal_strings() {
    let envelope = ResponseEnvelope::new(balances(), ExecutionMeta::default());

    let wire = envelope.encode(ResponseFormat::Json).unwrap();
    assert_eq!(wire.headers[CONTENT_TYPE], "application/json");
    let value: Value = serde_json::from_slice(&wire.body).unwrap();
    assert_eq!(
        value,
        json!({
            "data": [{"index": "7", "balance": "32000000000"}],
            "execution_optimistic": false,
            "finalized": false,
        })
    );

    let bytes = balances().as_ssz_bytes();
    let mut expected = 7u64.to_le_bytes().to_vec();
    expected.extend_from_slice(&32_000_000_000u64.to_le_bytes());
    assert_eq!(bytes, expected);
    assert_eq!(
        decode::<Vec<ValidatorBalance>>(&bytes).unwrap(),
        balances()
    );
}

#[test]
fn invalid_root_is_rejected_by_every_operation() {
    for &op in Operation::ALL {
        let mut params = BTreeMap::new();
        for name in op.route().param_names() {
            let value = if name == "state_id" { BAD_ROOT } else { "1" };
            params.insert(name.to_owned(), value.to_owned());
        }
        let wire = WireRequest {
            params,
            ..WireRequest::default()
        };

        let err = ApiRequest::parse(op, &wire).unwrap_err();
        assert_matches!(
            &err,
            ApiError::MalformedIdentifier { kind: "state id", value, .. }
                if value == BAD_ROOT,
            "{op}"
        );
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}

#[test]
fn schema_violations_precede_parsing() {
    let wire = WireRequest::default()
        .with_param("state_id", "head")
        .with_query(Query::parse("epoch=1&epoch=2"));
    assert_matches!(
        ApiRequest::parse(Operation::GetEpochCommittees, &wire),
        Err(ApiError::SchemaViolation { field, .. }) if field == "epoch"
    );

    let wire = WireRequest::default()
        .with_param("state_id", "head")
        .with_body(json!({"ids": []}));
    assert_matches!(
        ApiRequest::parse(Operation::GetStateRoot, &wire),
        Err(ApiError::SchemaViolation { .. })
    );

    let wire = WireRequest::default()
        .with_param("state_id", "head")
        .with_body(json!(["1", 2]));
    assert_eq!(
        ApiRequest::parse(Operation::PostStateValidatorBalances, &wire)
            .unwrap(),
        ApiRequest::PostStateValidatorBalances(ValidatorIdsArgs {
            state_id: StateId::Alias(StateAlias::Head),
            ids: Some(vec![ValidatorId::Index(1), ValidatorId::Index(2)]),
        })
    );
}

#[test]
fn transcode_preserves_payload_and_meta() {
    let meta = ExecutionMeta {
        execution_optimistic: true,
        finalized: false,
    };
    let json = ResponseEnvelope::new(balances(), meta)
        .encode(ResponseFormat::Json)
        .unwrap();

    let op = Operation::GetStateValidatorBalances;
    let ssz = op.transcode(&json, ResponseFormat::Ssz).unwrap();
    assert_eq!(ssz.format, ResponseFormat::Ssz);
    assert_eq!(ssz.headers[CONTENT_TYPE], "application/octet-stream");
    assert_eq!(ssz.headers[EXECUTION_OPTIMISTIC_HEADER], "true");
    assert_eq!(ssz.headers[FINALIZED_HEADER], "false");
    assert_eq!(ssz.body, balances().as_ssz_bytes());

    let back = op.transcode(&ssz, ResponseFormat::Json).unwrap();
    assert_eq!(back.body, json.body);

    assert!(
        Operation::GetStateRoot
            .transcode(&ssz, ResponseFormat::Json)
            .is_err()
    );
}

#[test]
fn accept_header_negotiation() {
    for (accept, expected) in [
        (None, ResponseFormat::Json),
        (Some("application/json"), ResponseFormat::Json),
        (Some("application/octet-stream"), ResponseFormat::Ssz),
        (
            Some("application/octet-stream;q=1.0,application/json;q=0.9"),
            ResponseFormat::Ssz,
        ),
        (
            Some("application/octet-stream;q=0.5,application/json"),
            ResponseFormat::Json,
        ),
        (Some("application/octet-stream;q=0"), ResponseFormat::Json),
        (Some("text/html"), ResponseFormat::Json),
    ] {
        assert_eq!(ResponseFormat::from_accept(accept), expected, "{accept:?}");
    }
}
