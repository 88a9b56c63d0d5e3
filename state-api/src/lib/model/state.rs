// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use crate::codec::container;
use crate::types::{Epoch, Root, Version};

container! {
    /// Root of the requested state.
    pub struct StateRoot {
        pub root: Root,
    }
}

container! {
    /// Fork versions in effect for the requested state.
    pub struct Fork {
        pub previous_version: Version,
        pub current_version: Version,
        /// Epoch at which `current_version` activated
        pub epoch: Epoch,
    }
}

container! {
    /// RANDAO mix for an epoch of the requested state.
    pub struct Randao {
        pub randao: Root,
    }
}

container! {
    pub struct Checkpoint {
        pub epoch: Epoch,
        pub root: Root,
    }
}

container! {
    pub struct FinalityCheckpoints {
        pub previous_justified: Checkpoint,
        pub current_justified: Checkpoint,
        pub finalized: Checkpoint,
    }
}
