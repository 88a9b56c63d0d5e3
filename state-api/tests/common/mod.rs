// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

#![allow(dead_code)]

use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;
use proptest::sample::select;
use state_api::model::{
    Checkpoint, EpochCommittee, EpochSyncCommittee, FinalityCheckpoints, Fork,
    Randao, StateRoot, Validator, ValidatorBalance, ValidatorIdentity,
    ValidatorResponse,
};
use state_api::types::{
    BlsPublicKey, Bytes, CommitteesFilters, StateAlias, StateId, ValidatorId,
    ValidatorStatus,
};

pub fn arb_state_id() -> impl Strategy<Value = StateId> {
    prop_oneof![
        select(StateAlias::ALL.to_vec()).prop_map(StateId::Alias),
        any::<u64>().prop_map(StateId::Slot),
        any::<[u8; 32]>().prop_map(|root| StateId::Root(Bytes(root))),
    ]
}

pub fn arb_validator_id() -> impl Strategy<Value = ValidatorId> {
    prop_oneof![
        any::<u64>().prop_map(ValidatorId::Index),
        "0x[0-9a-fA-F]{1,96}"
            .prop_map(|key| ValidatorId::parse(&key).expect("hex literal")),
    ]
}

pub fn arb_status() -> impl Strategy<Value = ValidatorStatus> {
    select(ValidatorStatus::ALL.to_vec())
}

/// Optional list, empty lists included.
pub fn arb_list<S: Strategy>(
    item: S,
) -> impl Strategy<Value = Option<Vec<S::Value>>> {
    option::of(vec(item, 0..6))
}

pub fn arb_committees_filters() -> impl Strategy<Value = CommitteesFilters> {
    (
        option::of(any::<u64>()),
        option::of(any::<u64>()),
        option::of(any::<u64>()),
    )
        .prop_map(|(epoch, index, slot)| CommitteesFilters {
            epoch,
            index,
            slot,
        })
}

pub fn arb_pubkey() -> impl Strategy<Value = BlsPublicKey> {
    vec(any::<u8>(), 48)
        .prop_map(|bytes| Bytes::from_slice(&bytes).expect("48 bytes"))
}

pub fn arb_validator() -> impl Strategy<Value = Validator> {
    (
        arb_pubkey(),
        any::<[u8; 32]>(),
        any::<u64>(),
        any::<bool>(),
        any::<[u64; 4]>(),
    )
        .prop_map(
            |(pubkey, credentials, effective_balance, slashed, epochs)| {
                Validator {
                    pubkey,
                    withdrawal_credentials: Bytes(credentials),
                    effective_balance,
                    slashed,
                    activation_eligibility_epoch: epochs[0],
                    activation_epoch: epochs[1],
                    exit_epoch: epochs[2],
                    withdrawable_epoch: epochs[3],
                }
            },
        )
}

pub fn arb_validator_response() -> impl Strategy<Value = ValidatorResponse> {
    (any::<u64>(), any::<u64>(), arb_status(), arb_validator()).prop_map(
        |(index, balance, status, validator)| ValidatorResponse {
            index,
            balance,
            status,
            validator,
        },
    )
}

pub fn arb_balance() -> impl Strategy<Value = ValidatorBalance> {
    (any::<u64>(), any::<u64>())
        .prop_map(|(index, balance)| ValidatorBalance { index, balance })
}

pub fn arb_committee() -> impl Strategy<Value = EpochCommittee> {
    (any::<u64>(), any::<u64>(), vec(any::<u64>(), 0..16)).prop_map(
        |(index, slot, validators)| EpochCommittee {
            index,
            slot,
            validators,
        },
    )
}

pub fn arb_sync_committee() -> impl Strategy<Value = EpochSyncCommittee> {
    (
        vec(any::<u64>(), 0..16),
        vec(vec(any::<u64>(), 0..8), 0..4),
    )
        .prop_map(|(validators, validator_aggregates)| EpochSyncCommittee {
            validators,
            validator_aggregates,
        })
}

pub fn arb_state_root() -> impl Strategy<Value = StateRoot> {
    any::<[u8; 32]>().prop_map(|root| StateRoot { root: Bytes(root) })
}

pub fn arb_randao() -> impl Strategy<Value = Randao> {
    any::<[u8; 32]>().prop_map(|randao| Randao {
        randao: Bytes(randao),
    })
}

pub fn arb_fork() -> impl Strategy<Value = Fork> {
    (any::<[u8; 4]>(), any::<[u8; 4]>(), any::<u64>()).prop_map(
        |(previous, current, epoch)| Fork {
            previous_version: Bytes(previous),
            current_version: Bytes(current),
            epoch,
        },
    )
}

pub fn arb_checkpoint() -> impl Strategy<Value = Checkpoint> {
    (any::<u64>(), any::<[u8; 32]>()).prop_map(|(epoch, root)| Checkpoint {
        epoch,
        root: Bytes(root),
    })
}

pub fn arb_finality_checkpoints() -> impl Strategy<Value = FinalityCheckpoints>
{
    (arb_checkpoint(), arb_checkpoint(), arb_checkpoint()).prop_map(
        |(previous_justified, current_justified, finalized)| {
            FinalityCheckpoints {
                previous_justified,
                current_justified,
                finalized,
            }
        },
    )
}

pub fn arb_identity() -> impl Strategy<Value = ValidatorIdentity> {
    (any::<u64>(), arb_pubkey(), any::<u64>()).prop_map(
        |(index, pubkey, activation_epoch)| ValidatorIdentity {
            index,
            pubkey,
            activation_epoch,
        },
    )
}
