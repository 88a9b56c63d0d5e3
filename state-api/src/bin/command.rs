// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::error::Error;
use std::fs;
use std::path::Path;

use http::HeaderMap;
use serde_json::Value;
use state_api::config::ApiConfig;
use state_api::{
    ApiRequest, ExecutionMeta, Operation, Query, ResponseFormat, WireRequest,
    WireResponse,
};
use tracing::{debug, info};

pub(crate) fn routes() {
    for &operation in Operation::ALL {
        let route = operation.route();
        let errors: Vec<_> =
            route.errors.iter().map(|status| status.as_str()).collect();
        println!(
            "{:<30} {:<5} {:<64} [{}] {}",
            operation.name(),
            route.method.as_str(),
            route.template,
            errors.join(","),
            operation.response_schema(),
        );
    }
}

pub(crate) fn request(
    config: &ApiConfig,
    operation: &str,
    params: Vec<(String, String)>,
    query: Option<String>,
    body: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let operation: Operation = operation.parse()?;
    let wire = WireRequest {
        params: params.into_iter().collect(),
        query: query.as_deref().map(Query::parse).unwrap_or_default(),
        body: body
            .as_deref()
            .map(serde_json::from_str::<Value>)
            .transpose()?,
    };

    let request = ApiRequest::parse(operation, &wire)?;
    info!(%operation, "Request is valid");
    debug!(args = ?request, "Parsed arguments");

    let written = request.write();
    let route = operation.route();
    let url = written.to_url(&route, &config.base_url()?)?;

    println!("{} {url}", route.method);
    println!("Accept: {}", config.response_format.content_type());
    if let Some(body) = &written.body {
        println!();
        println!("{}", serde_json::to_string_pretty(body)?);
    }
    Ok(())
}

pub(crate) fn transcode(
    operation: &str,
    from: ResponseFormat,
    input: &Path,
    meta: ExecutionMeta,
) -> Result<(), Box<dyn Error>> {
    let operation: Operation = operation.parse()?;
    let raw = fs::read(input)?;

    let mut headers = HeaderMap::new();
    let (body, to) = match from {
        ResponseFormat::Json => (raw, ResponseFormat::Ssz),
        ResponseFormat::Ssz => {
            meta.write_headers(&mut headers);
            (binary_input(raw)?, ResponseFormat::Json)
        }
    };
    info!(%operation, %from, %to, len = body.len(), "Transcoding response");

    let response = WireResponse::new(from, headers, body);
    let output = operation.transcode(&response, to)?;
    match to {
        ResponseFormat::Json => {
            let value: Value = serde_json::from_slice(&output.body)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        ResponseFormat::Ssz => {
            for (name, value) in &output.headers {
                println!("{name}: {}", value.to_str().unwrap_or_default());
            }
            println!();
            println!("0x{}", hex::encode(&output.body));
        }
    }
    Ok(())
}

/// Accepts raw bytes or their `0x`-prefixed hex rendering.
fn binary_input(raw: Vec<u8>) -> Result<Vec<u8>, hex::FromHexError> {
    match raw.trim_ascii().strip_prefix(b"0x") {
        Some(digits) => hex::decode(digits),
        None => Ok(raw),
    }
}
