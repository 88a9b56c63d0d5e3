// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use crate::codec::container;
use crate::types::{CommitteeIndex, Slot, ValidatorIndex};

container! {
    /// Validators assigned to one committee of one slot.
    pub struct EpochCommittee {
        pub index: CommitteeIndex,
        pub slot: Slot,
        pub validators: Vec<ValidatorIndex>,
    }
}

container! {
    /// Sync committee of an epoch, with its per-subnet aggregates.
    pub struct EpochSyncCommittee {
        pub validators: Vec<ValidatorIndex>,
        pub validator_aggregates: Vec<Vec<ValidatorIndex>>,
    }
}
