// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! State and validator identifiers.
//!
//! Identifiers arrive as loosely-typed strings and leave this module as
//! tagged variants. Classification is purely syntactic: a [`StateId::Root`]
//! is a well-formed 32-byte hex value, not a root known to the node, and a
//! [`ValidatorId::PublicKey`] is any `0x`-prefixed hex literal whose length
//! and curve point are checked by whoever resolves it.
//!
//! # Grammar
//!
//! ```text
//! state_id     := "head" | "genesis" | "finalized" | "justified"
//!               | decimal                 ; slot
//!               | "0x" hex{64}            ; state root
//! validator_id := decimal                 ; validator index
//!               | "0x" hex+               ; public key
//! ```
//!
//! # Examples
//!
//! ```rust
//! use state_api::types::{StateAlias, StateId, ValidatorId};
//!
//! assert_eq!(
//!     "finalized".parse::<StateId>().unwrap(),
//!     StateId::Alias(StateAlias::Finalized)
//! );
//! assert_eq!("12345".parse::<StateId>().unwrap(), StateId::Slot(12345));
//! assert!("latest".parse::<StateId>().is_err());
//!
//! assert_eq!("42".parse::<ValidatorId>().unwrap(), ValidatorId::Index(42));
//! assert!(matches!(
//!     "0xabc".parse::<ValidatorId>().unwrap(),
//!     ValidatorId::PublicKey(_)
//! ));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use super::{Root, Slot, ValidatorIndex};
use crate::decimal::{from_decimal_string, to_decimal_string};
use crate::error::ApiError;

const HEX_PREFIX: &str = "0x";

/// Named state references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateAlias {
    Head,
    Genesis,
    Finalized,
    Justified,
}

impl StateAlias {
    pub const ALL: [StateAlias; 4] =
        [Self::Head, Self::Genesis, Self::Finalized, Self::Justified];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Genesis => "genesis",
            Self::Finalized => "finalized",
            Self::Justified => "justified",
        }
    }

    fn from_literal(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|alias| alias.as_str() == s)
    }
}

/// Reference to a beacon state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    /// One of the named states
    Alias(StateAlias),
    /// State at the given slot
    Slot(Slot),
    /// State with the given root
    Root(Root),
}

impl StateId {
    const KIND: &'static str = "state id";

    /// Classifies a state identifier literal.
    pub fn parse(s: &str) -> Result<Self, ApiError> {
        if let Some(alias) = StateAlias::from_literal(s) {
            return Ok(Self::Alias(alias));
        }

        if s.starts_with(HEX_PREFIX) {
            if s.len() != Root::hex_len() {
                return Err(malformed(
                    Self::KIND,
                    s,
                    format!(
                        "expected {} characters, got {}",
                        Root::hex_len(),
                        s.len()
                    ),
                ));
            }
            return s
                .parse::<Root>()
                .map(Self::Root)
                .map_err(|e| malformed(Self::KIND, s, e.to_string()));
        }

        if s.bytes().next().is_some_and(|b| b.is_ascii_digit()) {
            return from_decimal_string(s)
                .map(Self::Slot)
                .map_err(|e| malformed(Self::KIND, s, e.to_string()));
        }

        Err(malformed(
            Self::KIND,
            s,
            "expected an alias, a slot or a 0x-prefixed root",
        ))
    }
}

impl FromStr for StateId {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alias(alias) => f.write_str(alias.as_str()),
            Self::Slot(slot) => f.write_str(&to_decimal_string(*slot)),
            Self::Root(root) => write!(f, "{root}"),
        }
    }
}

impl From<StateAlias> for StateId {
    fn from(alias: StateAlias) -> Self {
        Self::Alias(alias)
    }
}

/// Validator public key literal.
///
/// Holds `0x` followed by one or more hex digits, case preserved. The field
/// is private so that values are obtained through [`ValidatorId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKeyHex(String);

impl PublicKeyHex {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicKeyHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to a validator, either by registry index or by public key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValidatorId {
    Index(ValidatorIndex),
    PublicKey(PublicKeyHex),
}

impl ValidatorId {
    const KIND: &'static str = "validator id";

    /// Classifies a validator identifier literal.
    ///
    /// A `0x` prefix selects [`ValidatorId::PublicKey`]: at least one hex
    /// digit must follow and the literal is kept verbatim. Anything else must
    /// be a canonical decimal index.
    pub fn parse(s: &str) -> Result<Self, ApiError> {
        if let Some(digits) = s.strip_prefix(HEX_PREFIX) {
            if digits.is_empty() {
                return Err(malformed(Self::KIND, s, "no hex digits after 0x"));
            }
            if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(malformed(Self::KIND, s, "not a hex literal"));
            }
            return Ok(Self::PublicKey(PublicKeyHex(s.to_owned())));
        }
        from_decimal_string(s)
            .map(Self::Index)
            .map_err(|e| malformed(Self::KIND, s, e.to_string()))
    }

    /// Classifies a JSON array item: either an unsigned integer or a string
    /// literal.
    pub fn from_json(value: &Value) -> Result<Self, ApiError> {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Number(n) => n.as_u64().map(Self::Index).ok_or_else(|| {
                malformed(Self::KIND, &n.to_string(), "not an unsigned integer")
            }),
            other => Err(malformed(
                Self::KIND,
                &other.to_string(),
                "expected a string or an unsigned integer",
            )),
        }
    }
}

impl FromStr for ValidatorId {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ValidatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => f.write_str(&to_decimal_string(*index)),
            Self::PublicKey(key) => f.write_str(key.as_str()),
        }
    }
}

impl From<ValidatorIndex> for ValidatorId {
    fn from(index: ValidatorIndex) -> Self {
        Self::Index(index)
    }
}

impl Serialize for ValidatorId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

fn malformed(
    kind: &'static str,
    value: &str,
    reason: impl Into<String>,
) -> ApiError {
    let reason = reason.into();
    debug!(kind, value, reason = %reason, "Rejected identifier");
    ApiError::MalformedIdentifier {
        kind,
        value: value.to_owned(),
        reason,
    }
}
