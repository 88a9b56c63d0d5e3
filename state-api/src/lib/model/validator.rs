// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use crate::codec::container;
use crate::types::{
    BlsPublicKey, Epoch, Gwei, Root, ValidatorIndex, ValidatorStatus,
};

container! {
    /// Registry record of a validator.
    pub struct Validator {
        pub pubkey: BlsPublicKey,
        pub withdrawal_credentials: Root,
        pub effective_balance: Gwei,
        pub slashed: bool,
        pub activation_eligibility_epoch: Epoch,
        pub activation_epoch: Epoch,
        pub exit_epoch: Epoch,
        pub withdrawable_epoch: Epoch,
    }
}

container! {
    /// A validator together with its index, balance and derived status.
    pub struct ValidatorResponse {
        pub index: ValidatorIndex,
        pub balance: Gwei,
        pub status: ValidatorStatus,
        pub validator: Validator,
    }
}

container! {
    pub struct ValidatorBalance {
        pub index: ValidatorIndex,
        pub balance: Gwei,
    }
}

container! {
    pub struct ValidatorIdentity {
        pub index: ValidatorIndex,
        pub pubkey: BlsPublicKey,
        pub activation_epoch: Epoch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{JsonCodec, Schema};
    use crate::codec::binary::decode;
    use crate::error::DecodeError;
    use crate::types::Bytes;
    use serde_json::json;
    use ssz::Encode;

    const FAR_FUTURE_EPOCH: Epoch = u64::MAX;

    fn validator() -> Validator {
        Validator {
            pubkey: Bytes([0xaa; 48]),
            withdrawal_credentials: Bytes([0x01; 32]),
            effective_balance: 32_000_000_000,
            slashed: false,
            activation_eligibility_epoch: 0,
            activation_epoch: 0,
            exit_epoch: FAR_FUTURE_EPOCH,
            withdrawable_epoch: FAR_FUTURE_EPOCH,
        }
    }

    #[test]
    fn test_validator_record() {
        assert_eq!(
            Validator::SCHEMA.fixed_size(),
            Some(48 + 32 + 8 + 1 + 4 * 8)
        );

        let value = validator().to_json();
        assert_eq!(value["exit_epoch"], json!("18446744073709551615"));
        assert_eq!(value["slashed"], json!(false));
        assert_eq!(Validator::from_json(&value).unwrap(), validator());
    }

    #[test]
    fn test_validator_response_carries_status_out_of_line() {
        let response = ValidatorResponse {
            index: 3,
            balance: 32_000_000_001,
            status: ValidatorStatus::ActiveOngoing,
            validator: validator(),
        };
        assert_eq!(ValidatorResponse::SCHEMA.fixed_size(), None);

        let bytes = response.as_ssz_bytes();
        let fixed_len = 8 + 8 + 4 + 121;
        assert_eq!(&bytes[16..20], &(fixed_len as u32).to_le_bytes());
        assert_eq!(&bytes[fixed_len..], b"active_ongoing");
        assert_eq!(decode::<ValidatorResponse>(&bytes).unwrap(), response);

        let value = response.to_json();
        assert_eq!(value["status"], json!("active_ongoing"));
        assert_eq!(ValidatorResponse::from_json(&value).unwrap(), response);
    }

    #[test]
    fn test_balances_json() {
        let balances = vec![ValidatorBalance {
            index: 7,
            balance: 32_000_000_000,
        }];
        let value = balances.to_json();
        assert_eq!(value, json!([{"index": "7", "balance": "32000000000"}]));
        assert_eq!(Vec::<ValidatorBalance>::from_json(&value).unwrap(), balances);

        assert_eq!(
            ValidatorBalance::from_json(&json!({"index": "7"})),
            Err(DecodeError::MissingField("balance"))
        );
    }

    #[test]
    fn test_identity_rejects_short_pubkey() {
        let value = json!({
            "index": "1",
            "pubkey": "0xaaaa",
            "activation_epoch": "0",
        });
        assert!(matches!(
            ValidatorIdentity::from_json(&value),
            Err(DecodeError::InvalidHex(_))
        ));
    }
}
