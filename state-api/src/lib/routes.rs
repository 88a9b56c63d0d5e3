// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Route table of the state-query API.
//!
//! The set of operations is closed. [`Operation`] and [`ApiRequest`] are
//! generated from a single registry that pairs every operation with the
//! [`Endpoint`] implementing it, so an operation without a route, a request
//! codec or a response schema does not compile.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use http::StatusCode;
use percent_encoding::{
    percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS,
};
use tracing::{debug, trace};

use crate::codec::{Schema, TypeSchema};
use crate::endpoints::{committees, state, validators, Endpoint};
use crate::error::ApiError;
use crate::request::{RequestSchema, WireRequest};
use crate::response::{ResponseEnvelope, ResponseFormat, WireResponse};

/// Path prefix shared by every operation.
pub const PATH_PREFIX: &str = "/eth/v1/beacon";

/// Characters escaped in a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => http::Method::GET,
            Method::Post => http::Method::POST,
        }
    }
}

impl TryFrom<&http::Method> for Method {
    type Error = ApiError;

    fn try_from(method: &http::Method) -> Result<Self, Self::Error> {
        if method == http::Method::GET {
            Ok(Self::Get)
        } else if method == http::Method::POST {
            Ok(Self::Post)
        } else {
            Err(ApiError::schema("method", format!("{method} not allowed")))
        }
    }
}

/// HTTP method and URL template of an operation.
///
/// Templates name their path parameters in braces, e.g.
/// `/eth/v1/beacon/states/{state_id}/root`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub method: Method,
    pub template: &'static str,
    /// Error statuses the operation may answer with
    pub errors: &'static [StatusCode],
}

enum Segment<'a> {
    Literal(&'a str),
    Param(&'a str),
}

impl Route {
    pub const fn get(template: &'static str) -> Self {
        Self {
            method: Method::Get,
            template,
            errors: &[StatusCode::BAD_REQUEST, StatusCode::NOT_FOUND],
        }
    }

    pub const fn post(template: &'static str) -> Self {
        Self {
            method: Method::Post,
            template,
            errors: &[StatusCode::BAD_REQUEST, StatusCode::NOT_FOUND],
        }
    }

    fn segments(&self) -> impl Iterator<Item = Segment<'static>> {
        self.template.split('/').skip(1).map(|s| {
            match s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => Segment::Param(name),
                None => Segment::Literal(s),
            }
        })
    }

    /// Names of the path parameters, in template order.
    pub fn param_names(&self) -> impl Iterator<Item = &'static str> {
        self.segments().filter_map(|s| match s {
            Segment::Param(name) => Some(name),
            Segment::Literal(_) => None,
        })
    }

    /// Substitutes `params` into the template, percent-encoding every value.
    pub fn resolve(
        &self,
        params: &BTreeMap<String, String>,
    ) -> Result<String, ApiError> {
        let mut path = String::with_capacity(self.template.len());
        for segment in self.segments() {
            path.push('/');
            match segment {
                Segment::Literal(s) => path.push_str(s),
                Segment::Param(name) => {
                    let value = params.get(name).ok_or_else(|| {
                        debug!(param = name, "Cannot resolve route");
                        ApiError::schema(name, "missing path parameter")
                    })?;
                    path.extend(utf8_percent_encode(value, PATH_SEGMENT));
                }
            }
        }
        trace!(method = %self.method, %path, "Resolved route");
        Ok(path)
    }

    /// Extracts the decoded path parameters if `path` matches the template.
    ///
    /// Any query string is ignored.
    pub fn match_path(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let path = path.split('?').next().unwrap_or_default();
        let path = path.strip_prefix('/')?;

        let mut params = BTreeMap::new();
        let mut parts = path.split('/');
        for segment in self.segments() {
            let part = parts.next()?;
            match segment {
                Segment::Literal(s) if s == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    let value = percent_decode_str(part).decode_utf8().ok()?;
                    if value.is_empty() {
                        return None;
                    }
                    params.insert(name.to_owned(), value.into_owned());
                }
            }
        }
        if parts.next().is_some() {
            return None;
        }
        Some(params)
    }

    /// Returns `true` if some concrete request could match both routes.
    pub fn overlaps(&self, other: &Route) -> bool {
        if self.method != other.method {
            return false;
        }
        let mine: Vec<_> = self.segments().collect();
        let theirs: Vec<_> = other.segments().collect();
        mine.len() == theirs.len()
            && mine.iter().zip(&theirs).all(|pair| match pair {
                (Segment::Literal(a), Segment::Literal(b)) => a == b,
                _ => true,
            })
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.template)
    }
}

fn transcode<E: Endpoint>(
    response: &WireResponse,
    to: ResponseFormat,
) -> Result<WireResponse, ApiError> {
    ResponseEnvelope::<E::Data>::decode(response)?.encode(to)
}

macro_rules! registry {
    ($($variant:ident($name:literal) => $endpoint:ty,)+) => {
        /// Every operation of the state-query API.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Operation {
            $($variant,)+
        }

        impl Operation {
            pub const ALL: &'static [Operation] = &[$(Self::$variant,)+];

            /// Operation id, e.g. `getStateRoot`.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            pub const fn route(self) -> Route {
                match self {
                    $(Self::$variant => <$endpoint as Endpoint>::ROUTE,)+
                }
            }

            pub fn request_schema(self) -> &'static RequestSchema {
                match self {
                    $(Self::$variant => &<$endpoint as Endpoint>::REQUEST_SCHEMA,)+
                }
            }

            /// Schema of the `data` payload of a successful response.
            pub fn response_schema(self) -> &'static TypeSchema {
                match self {
                    $(Self::$variant => {
                        &<<$endpoint as Endpoint>::Data as Schema>::SCHEMA
                    })+
                }
            }

            /// Re-encodes a response of this operation in another format.
            ///
            /// The payload is fully decoded on the way, so a malformed body
            /// is rejected rather than passed through.
            pub fn transcode(
                self,
                response: &WireResponse,
                to: ResponseFormat,
            ) -> Result<WireResponse, ApiError> {
                match self {
                    $(Self::$variant => transcode::<$endpoint>(response, to),)+
                }
            }
        }

        /// Typed arguments of any operation.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum ApiRequest {
            $($variant(<$endpoint as Endpoint>::Args),)+
        }

        impl ApiRequest {
            pub fn operation(&self) -> Operation {
                match self {
                    $(Self::$variant(_) => Operation::$variant,)+
                }
            }

            /// Validates `wire` against the operation schema, then parses it.
            pub fn parse(
                operation: Operation,
                wire: &WireRequest,
            ) -> Result<Self, ApiError> {
                operation.request_schema().validate(wire)?;
                match operation {
                    $(Operation::$variant => {
                        <$endpoint as Endpoint>::parse_req(wire)
                            .map(Self::$variant)
                    })+
                }
            }

            pub fn write(&self) -> WireRequest {
                match self {
                    $(Self::$variant(args) => {
                        <$endpoint as Endpoint>::write_req(args)
                    })+
                }
            }
        }
    };
}

registry! {
    GetStateRoot("getStateRoot") => state::GetStateRoot,
    GetStateFork("getStateFork") => state::GetStateFork,
    GetStateRandao("getStateRandao") => state::GetStateRandao,
    GetStateFinalityCheckpoints("getStateFinalityCheckpoints")
        => state::GetStateFinalityCheckpoints,
    GetStateValidators("getStateValidators")
        => validators::GetStateValidators,
    PostStateValidators("postStateValidators")
        => validators::PostStateValidators,
    GetStateValidator("getStateValidator") => validators::GetStateValidator,
    GetStateValidatorBalances("getStateValidatorBalances")
        => validators::GetStateValidatorBalances,
    PostStateValidatorBalances("postStateValidatorBalances")
        => validators::PostStateValidatorBalances,
    PostStateValidatorIdentities("postStateValidatorIdentities")
        => validators::PostStateValidatorIdentities,
    GetEpochCommittees("getEpochCommittees")
        => committees::GetEpochCommittees,
    GetEpochSyncCommittees("getEpochSyncCommittees")
        => committees::GetEpochSyncCommittees,
}

impl Operation {
    /// Finds the operation serving `method` and `path`, together with the
    /// decoded path parameters.
    pub fn lookup(
        method: Method,
        path: &str,
    ) -> Option<(Operation, BTreeMap<String, String>)> {
        Self::ALL.iter().find_map(|&op| {
            let route = op.route();
            if route.method != method {
                return None;
            }
            route.match_path(path).map(|params| (op, params))
        })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| ApiError::UnknownOperation(s.to_owned()))
    }
}
