// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Schema-driven payload codecs.
//!
//! Every payload type carries one [`TypeSchema`] and two renderings derived
//! from it: [`JsonCodec`] and the SSZ binary layout (`ssz::Encode` and
//! `ssz::Decode`). Containers are declared through the [`container!`] macro
//! so that each field is listed exactly once and both renderings, plus the
//! schema constant, are generated from that list.

pub mod binary;
pub mod json;
pub mod schema;

use std::fmt::Debug;

pub use json::JsonCodec;
pub use schema::{Field, Schema, TypeSchema, BYTES_PER_LENGTH_OFFSET};

/// A value that can be carried as the `data` of a response.
pub trait Payload:
    ssz::Encode
    + ssz::Decode
    + JsonCodec
    + Clone
    + PartialEq
    + Debug
    + Send
    + Sync
    + 'static
{
}

impl<T> Payload for T where
    T: ssz::Encode
        + ssz::Decode
        + JsonCodec
        + Clone
        + PartialEq
        + Debug
        + Send
        + Sync
        + 'static
{
}

/// Declares a payload container.
///
/// Emits the struct together with its [`Schema`], `ssz::Encode`,
/// `ssz::Decode` and [`JsonCodec`] implementations. JSON keys are the field
/// identifiers; the binary layout follows declaration order and its fixed
/// part is sized from the field schemas.
macro_rules! container {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                pub $field:ident: $ty:ty,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )+
        }

        impl $crate::codec::Schema for $name {
            const SCHEMA: $crate::codec::TypeSchema =
                $crate::codec::TypeSchema::Container {
                    name: stringify!($name),
                    fields: &[$(
                        $crate::codec::Field {
                            name: stringify!($field),
                            schema: &<$ty as $crate::codec::Schema>::SCHEMA,
                        },
                    )+],
                };
        }

        impl $name {
            /// Length of the fixed part: fixed fields inline, an offset for
            /// every variable one.
            const FIXED_PART_LEN: usize = 0 $(
                + <$ty as $crate::codec::Schema>::SCHEMA.fixed_part_len()
            )+;
        }

        impl ::ssz::Encode for $name {
            fn is_ssz_fixed_len() -> bool {
                <Self as $crate::codec::Schema>::SCHEMA.is_fixed_size()
            }

            fn ssz_fixed_len() -> usize {
                <Self as $crate::codec::Schema>::SCHEMA.fixed_part_len()
            }

            fn ssz_bytes_len(&self) -> usize {
                0 $(+ if <$ty as ::ssz::Encode>::is_ssz_fixed_len() {
                    <$ty as ::ssz::Encode>::ssz_fixed_len()
                } else {
                    ::ssz::BYTES_PER_LENGTH_OFFSET
                        + ::ssz::Encode::ssz_bytes_len(&self.$field)
                })+
            }

            fn ssz_append(&self, buf: &mut Vec<u8>) {
                let mut encoder =
                    ::ssz::SszEncoder::container(buf, Self::FIXED_PART_LEN);
                $(encoder.append(&self.$field);)+
                encoder.finalize();
            }
        }

        impl ::ssz::Decode for $name {
            fn is_ssz_fixed_len() -> bool {
                <Self as $crate::codec::Schema>::SCHEMA.is_fixed_size()
            }

            fn ssz_fixed_len() -> usize {
                <Self as $crate::codec::Schema>::SCHEMA.fixed_part_len()
            }

            fn from_ssz_bytes(
                bytes: &[u8],
            ) -> Result<Self, ::ssz::DecodeError> {
                let mut builder = ::ssz::SszDecoderBuilder::new(bytes);
                $(builder.register_type::<$ty>()?;)+
                let mut decoder = builder.build()?;
                Ok(Self {
                    $($field: decoder.decode_next::<$ty>()?,)+
                })
            }
        }

        impl $crate::codec::JsonCodec for $name {
            fn to_json(&self) -> ::serde_json::Value {
                let mut object = ::serde_json::Map::new();
                $(
                    object.insert(
                        stringify!($field).to_owned(),
                        $crate::codec::JsonCodec::to_json(&self.$field),
                    );
                )+
                ::serde_json::Value::Object(object)
            }

            fn from_json(
                value: &::serde_json::Value,
            ) -> Result<Self, $crate::error::DecodeError> {
                let object = value.as_object().ok_or(
                    $crate::error::DecodeError::UnexpectedJsonType(
                        stringify!($name),
                    ),
                )?;
                Ok(Self {
                    $(
                        $field: $crate::codec::json::decode_field(
                            object,
                            stringify!($field),
                        )?,
                    )+
                })
            }
        }
    };
}

pub(crate) use container;
