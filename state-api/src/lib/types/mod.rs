// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

pub mod bytes;
pub mod filter;
pub mod identifier;

pub use bytes::{BlsPublicKey, Bytes, Root, Version};
pub use filter::{CommitteesFilters, ValidatorFilters, ValidatorStatus};
pub use identifier::{PublicKeyHex, StateAlias, StateId, ValidatorId};

pub type Slot = u64;
pub type Epoch = u64;
pub type ValidatorIndex = u64;
pub type CommitteeIndex = u64;
pub type Gwei = u64;
