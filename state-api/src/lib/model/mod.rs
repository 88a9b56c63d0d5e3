// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Response payloads of the state-query operations.

pub mod committee;
pub mod state;
pub mod validator;

pub use committee::{EpochCommittee, EpochSyncCommittee};
pub use state::{Checkpoint, FinalityCheckpoints, Fork, Randao, StateRoot};
pub use validator::{
    Validator, ValidatorBalance, ValidatorIdentity, ValidatorResponse,
};
