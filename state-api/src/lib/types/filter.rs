// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Query filters for validator and committee listings.
//!
//! An absent list and an explicitly empty list are kept apart (`None` versus
//! `Some(vec![])`). Whether an empty list selects everything or nothing is up
//! to the handler that consumes the filter.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::{CommitteeIndex, Epoch, Slot, ValidatorId};
use crate::error::DecodeError;

/// Validator lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorStatus {
    Active,
    PendingInitialized,
    PendingQueued,
    ActiveOngoing,
    ActiveExiting,
    ActiveSlashed,
    ExitedUnslashed,
    ExitedSlashed,
    WithdrawalPossible,
    WithdrawalDone,
}

impl ValidatorStatus {
    pub const ALL: [ValidatorStatus; 10] = [
        Self::Active,
        Self::PendingInitialized,
        Self::PendingQueued,
        Self::ActiveOngoing,
        Self::ActiveExiting,
        Self::ActiveSlashed,
        Self::ExitedUnslashed,
        Self::ExitedSlashed,
        Self::WithdrawalPossible,
        Self::WithdrawalDone,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::PendingInitialized => "pending_initialized",
            Self::PendingQueued => "pending_queued",
            Self::ActiveOngoing => "active_ongoing",
            Self::ActiveExiting => "active_exiting",
            Self::ActiveSlashed => "active_slashed",
            Self::ExitedUnslashed => "exited_unslashed",
            Self::ExitedSlashed => "exited_slashed",
            Self::WithdrawalPossible => "withdrawal_possible",
            Self::WithdrawalDone => "withdrawal_done",
        }
    }
}

impl FromStr for ValidatorStatus {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DecodeError::InvalidStatus(s.to_owned()))
    }
}

impl fmt::Display for ValidatorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters for validator listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatorFilters {
    pub ids: Option<Vec<ValidatorId>>,
    pub statuses: Option<Vec<ValidatorStatus>>,
}

impl ValidatorFilters {
    pub fn new(
        ids: Option<Vec<ValidatorId>>,
        statuses: Option<Vec<ValidatorStatus>>,
    ) -> Self {
        Self { ids, statuses }
    }
}

/// Filters for committee listings.
///
/// Each filter is independent; a committee is selected when it satisfies
/// every filter that is present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitteesFilters {
    pub epoch: Option<Epoch>,
    pub index: Option<CommitteeIndex>,
    pub slot: Option<Slot>,
}
