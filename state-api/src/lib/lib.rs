// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Typed route registry and wire codecs of the beacon state-query API.
//!
//! Requests flow from typed arguments to a transport-neutral
//! [`WireRequest`] and back; responses flow from typed payloads to a JSON or
//! compact binary [`WireResponse`] and back. Nothing here performs I/O.

pub mod codec;
pub mod config;
pub mod decimal;
pub mod endpoints;
pub mod error;
pub mod model;
pub mod request;
pub mod response;
pub mod routes;
pub mod types;

pub use crate::error::{ApiError, DecodeError};
pub use crate::request::{Query, WireRequest};
pub use crate::response::{
    ExecutionMeta, ResponseEnvelope, ResponseFormat, WireResponse,
};
pub use crate::routes::{ApiRequest, Method, Operation, Route};

pub type Result<T, E = ApiError> = core::result::Result<T, E>;
