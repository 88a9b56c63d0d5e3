// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::fmt;

/// Size in bytes of an offset in the binary encoding.
pub const BYTES_PER_LENGTH_OFFSET: usize = 4;

/// Description of a payload type, shared by the JSON and binary codecs.
#[derive(Debug, PartialEq, Eq)]
pub enum TypeSchema {
    Uint64,
    Boolean,
    /// Fixed number of raw bytes
    ByteVector(usize),
    /// UTF-8 text of any length
    Utf8String,
    List(&'static TypeSchema),
    Container {
        name: &'static str,
        fields: &'static [Field],
    },
}

/// Named container field.
#[derive(Debug, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub schema: &'static TypeSchema,
}

impl TypeSchema {
    /// Encoded size of every value of this type, or `None` if the size
    /// depends on the value.
    pub const fn fixed_size(&self) -> Option<usize> {
        match self {
            Self::Uint64 => Some(8),
            Self::Boolean => Some(1),
            Self::ByteVector(len) => Some(*len),
            Self::Utf8String | Self::List(_) => None,
            Self::Container { fields, .. } => {
                let mut size = 0;
                let mut i = 0;
                while i < fields.len() {
                    match fields[i].schema.fixed_size() {
                        Some(len) => size += len,
                        None => return None,
                    }
                    i += 1;
                }
                Some(size)
            }
        }
    }

    pub const fn is_fixed_size(&self) -> bool {
        self.fixed_size().is_some()
    }

    /// Bytes taken in the fixed part of an enclosing container or list:
    /// the value itself when fixed-size, an offset otherwise.
    pub const fn fixed_part_len(&self) -> usize {
        match self.fixed_size() {
            Some(len) => len,
            None => BYTES_PER_LENGTH_OFFSET,
        }
    }
}

impl fmt::Display for TypeSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uint64 => f.write_str("uint64"),
            Self::Boolean => f.write_str("boolean"),
            Self::ByteVector(len) => write!(f, "Bytes{len}"),
            Self::Utf8String => f.write_str("string"),
            Self::List(item) => write!(f, "List[{item}]"),
            Self::Container { name, .. } => f.write_str(name),
        }
    }
}

/// Types with a static schema description.
pub trait Schema {
    const SCHEMA: TypeSchema;
}
