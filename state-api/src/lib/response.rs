// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Response envelope and content negotiation.
//!
//! Every state-query payload is wrapped in the same [`ResponseEnvelope`].
//! In JSON the envelope is part of the body:
//!
//! ```json
//! { "data": ..., "execution_optimistic": false, "finalized": true }
//! ```
//!
//! In binary mode the body is the payload alone and the flags travel in the
//! `Eth-Execution-Optimistic` and `Eth-Finalized` headers.

use std::fmt;
use std::str::FromStr;

use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ssz::Encode;
use tracing::trace;

use crate::codec::{Payload, binary};
use crate::error::{ApiError, DecodeError};

pub const EXECUTION_OPTIMISTIC_HEADER: HeaderName =
    HeaderName::from_static("eth-execution-optimistic");
pub const FINALIZED_HEADER: HeaderName =
    HeaderName::from_static("eth-finalized");

const JSON_CONTENT_TYPE: &str = "application/json";
const SSZ_CONTENT_TYPE: &str = "application/octet-stream";

/// Wire format of a response body.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Json,
    Ssz,
}

impl ResponseFormat {
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Json => JSON_CONTENT_TYPE,
            Self::Ssz => SSZ_CONTENT_TYPE,
        }
    }

    /// Picks the format from an `Accept` header value.
    ///
    /// Binary is selected when `application/octet-stream` is accepted with a
    /// weight at least as high as any range that admits JSON. An absent or
    /// unrecognized header selects JSON.
    pub fn from_accept(accept: Option<&str>) -> Self {
        let Some(accept) = accept else {
            return Self::Json;
        };

        let mut ssz_weight = 0.0f32;
        let mut json_weight = 0.0f32;
        for range in accept.split(',') {
            let mut parts = range.split(';').map(str::trim);
            let media = parts.next().unwrap_or_default().to_ascii_lowercase();
            let weight = parts
                .filter_map(|p| p.strip_prefix("q="))
                .find_map(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);

            match media.as_str() {
                SSZ_CONTENT_TYPE => ssz_weight = ssz_weight.max(weight),
                JSON_CONTENT_TYPE | "application/*" | "*/*" => {
                    json_weight = json_weight.max(weight)
                }
                _ => {}
            }
        }

        if ssz_weight > 0.0 && ssz_weight >= json_weight {
            Self::Ssz
        } else {
            Self::Json
        }
    }

    /// Picks the format from the `Accept` header of a request.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self::from_accept(headers.get(ACCEPT).and_then(|v| v.to_str().ok()))
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Ssz => f.write_str("ssz"),
        }
    }
}

impl FromStr for ResponseFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "ssz" => Ok(Self::Ssz),
            other => Err(format!("unknown response format '{other}'")),
        }
    }
}

/// Protocol metadata attached to every state-query response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ExecutionMeta {
    pub execution_optimistic: bool,
    pub finalized: bool,
}

impl ExecutionMeta {
    fn from_json(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        let flag = |name: &str| match object.get(name) {
            None | Some(Value::Null) => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(DecodeError::UnexpectedJsonType("boolean")),
        };
        Ok(Self {
            execution_optimistic: flag("execution_optimistic")?,
            finalized: flag("finalized")?,
        })
    }

    /// Writes the flags as `Eth-Execution-Optimistic` and `Eth-Finalized`.
    pub fn write_headers(&self, headers: &mut HeaderMap) {
        headers.insert(
            EXECUTION_OPTIMISTIC_HEADER,
            bool_header(self.execution_optimistic),
        );
        headers.insert(FINALIZED_HEADER, bool_header(self.finalized));
    }

    fn from_headers(headers: &HeaderMap) -> Result<Self, DecodeError> {
        Ok(Self {
            execution_optimistic: read_bool_header(
                headers,
                EXECUTION_OPTIMISTIC_HEADER,
                "Eth-Execution-Optimistic",
            )?,
            finalized: read_bool_header(
                headers,
                FINALIZED_HEADER,
                "Eth-Finalized",
            )?,
        })
    }
}

fn bool_header(value: bool) -> HeaderValue {
    if value {
        HeaderValue::from_static("true")
    } else {
        HeaderValue::from_static("false")
    }
}

fn read_bool_header(
    headers: &HeaderMap,
    key: HeaderName,
    name: &'static str,
) -> Result<bool, DecodeError> {
    let Some(value) = headers.get(key) else {
        return Ok(false);
    };
    match value.to_str().map(str::trim) {
        Ok(v) if v.eq_ignore_ascii_case("true") => Ok(true),
        Ok(v) if v.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(DecodeError::InvalidHeader {
            name,
            value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
        }),
    }
}

/// A payload wrapped with its [`ExecutionMeta`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope<T> {
    pub data: T,
    pub meta: ExecutionMeta,
}

impl<T> ResponseEnvelope<T> {
    pub fn new(data: T, meta: ExecutionMeta) -> Self {
        Self { data, meta }
    }

    pub fn into_data(self) -> T {
        self.data
    }
}

impl<T: Payload> ResponseEnvelope<T> {
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("data".to_owned(), self.data.to_json());
        object.insert(
            "execution_optimistic".to_owned(),
            Value::Bool(self.meta.execution_optimistic),
        );
        object.insert("finalized".to_owned(), Value::Bool(self.meta.finalized));
        Value::Object(object)
    }

    /// Decodes a JSON envelope; absent flags default to `false`.
    pub fn from_json(value: &Value) -> Result<Self, DecodeError> {
        let object = value
            .as_object()
            .ok_or(DecodeError::UnexpectedJsonType("response envelope"))?;
        let data = object.get("data").ok_or(DecodeError::MissingField("data"))?;
        Ok(Self {
            data: T::from_json(data)?,
            meta: ExecutionMeta::from_json(object)?,
        })
    }

    /// Renders the envelope in the given format.
    pub fn encode(
        &self,
        format: ResponseFormat,
    ) -> Result<WireResponse, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static(format.content_type()),
        );
        let body = match format {
            ResponseFormat::Json => serde_json::to_vec(&self.to_json())?,
            ResponseFormat::Ssz => {
                self.meta.write_headers(&mut headers);
                self.data.as_ssz_bytes()
            }
        };
        trace!(
            %format,
            len = body.len(),
            schema = %T::SCHEMA,
            "Encoded response"
        );
        Ok(WireResponse {
            format,
            headers,
            body,
        })
    }

    pub fn decode(response: &WireResponse) -> Result<Self, ApiError> {
        match response.format {
            ResponseFormat::Json => {
                let value: Value = serde_json::from_slice(&response.body)?;
                Ok(Self::from_json(&value)?)
            }
            ResponseFormat::Ssz => Ok(Self {
                data: binary::decode(&response.body)?,
                meta: ExecutionMeta::from_headers(&response.headers)?,
            }),
        }
    }
}

/// A rendered response: body bytes plus the headers that go with them.
#[derive(Debug, Clone, PartialEq)]
pub struct WireResponse {
    pub format: ResponseFormat,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl WireResponse {
    pub fn new(
        format: ResponseFormat,
        headers: HeaderMap,
        body: Vec<u8>,
    ) -> Self {
        Self {
            format,
            headers,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Checkpoint, ValidatorBalance};
    use crate::types::Bytes;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn balances() -> Vec<ValidatorBalance> {
        vec![ValidatorBalance {
            index: 7,
            balance: 32_000_000_000,
        }]
    }

    #[test]
    fn test_accept_negotiation() {
        assert_eq!(ResponseFormat::from_accept(None), ResponseFormat::Json);
        assert_eq!(
            ResponseFormat::from_accept(Some("application/json")),
            ResponseFormat::Json
        );
        assert_eq!(
            ResponseFormat::from_accept(Some("application/octet-stream")),
            ResponseFormat::Ssz
        );
        assert_eq!(
            ResponseFormat::from_accept(Some(
                "application/octet-stream;q=0.5, application/json;q=0.9"
            )),
            ResponseFormat::Json
        );
        assert_eq!(
            ResponseFormat::from_accept(Some(
                "application/octet-stream;q=1.0,application/json;q=0.9"
            )),
            ResponseFormat::Ssz
        );
        assert_eq!(
            ResponseFormat::from_accept(Some("application/octet-stream;q=0")),
            ResponseFormat::Json
        );
        assert_eq!(
            ResponseFormat::from_accept(Some("text/html")),
            ResponseFormat::Json
        );
    }

    #[test]
    fn test_json_envelope() {
        let envelope = ResponseEnvelope::new(
            balances(),
            ExecutionMeta {
                execution_optimistic: false,
                finalized: true,
            },
        );
        let response = envelope.encode(ResponseFormat::Json).unwrap();
        assert_eq!(response.headers[CONTENT_TYPE], "application/json");

        let value: Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(
            value,
            json!({
                "data": [{"index": "7", "balance": "32000000000"}],
                "execution_optimistic": false,
                "finalized": true,
            })
        );
        assert_eq!(ResponseEnvelope::decode(&response).unwrap(), envelope);
    }

    #[test]
    fn test_json_flags_default_to_false() {
        let data = json!({"epoch": "1", "root": Bytes([0u8; 32]).to_string()});

        let value = json!({ "data": data });
        let envelope = ResponseEnvelope::<Checkpoint>::from_json(&value).unwrap();
        assert_eq!(envelope.meta, ExecutionMeta::default());

        let value = json!({ "data": data, "finalized": "yes" });
        assert_eq!(
            ResponseEnvelope::<Checkpoint>::from_json(&value),
            Err(DecodeError::UnexpectedJsonType("boolean"))
        );
        assert_eq!(
            ResponseEnvelope::<Checkpoint>::from_json(&json!({})),
            Err(DecodeError::MissingField("data"))
        );
    }

    #[test]
    fn test_binary_envelope_uses_headers() {
        let envelope = ResponseEnvelope::new(
            balances(),
            ExecutionMeta {
                execution_optimistic: true,
                finalized: false,
            },
        );
        let response = envelope.encode(ResponseFormat::Ssz).unwrap();
        assert_eq!(response.body.len(), 16);
        assert_eq!(response.headers[&EXECUTION_OPTIMISTIC_HEADER], "true");
        assert_eq!(response.headers[&FINALIZED_HEADER], "false");
        assert_eq!(ResponseEnvelope::decode(&response).unwrap(), envelope);

        let bare = WireResponse::new(
            ResponseFormat::Ssz,
            HeaderMap::new(),
            response.body.clone(),
        );
        let decoded = ResponseEnvelope::<Vec<ValidatorBalance>>::decode(&bare)
            .unwrap();
        assert_eq!(decoded.meta, ExecutionMeta::default());
        assert_eq!(decoded.into_data(), balances());

        let mut headers = HeaderMap::new();
        headers.insert(FINALIZED_HEADER, HeaderValue::from_static("maybe"));
        let invalid =
            WireResponse::new(ResponseFormat::Ssz, headers, response.body);
        assert_matches!(
            ResponseEnvelope::<Vec<ValidatorBalance>>::decode(&invalid),
            Err(ApiError::Decode(DecodeError::InvalidHeader {
                name: "Eth-Finalized",
                ..
            }))
        );
    }
}
