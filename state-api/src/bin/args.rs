// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use state_api::ResponseFormat;

#[derive(Parser, Debug)]
#[command(
    author = "Dusk Network B.V. All Rights Reserved.",
    version,
    about = "Route table and wire codecs of the beacon state-query API"
)]
pub struct Args {
    /// Sets the configuration file path
    #[clap(long, short, env = "STATE_API_CONFIG_TOML", value_parser)]
    pub config: Option<PathBuf>,

    /// Output log level
    #[clap(long)]
    pub log_level: Option<tracing::Level>,

    // Change the log format accordingly
    #[clap(long, value_parser = PossibleValuesParser::new(["coloured", "plain", "json"]))]
    pub log_type: Option<String>,

    /// Add log filter(s)
    #[clap(long)]
    pub log_filter: Option<String>,

    /// Node endpoint requests are resolved against
    #[clap(long)]
    pub base_url: Option<String>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every operation with its route and payload schema
    Routes,

    /// Validate and parse a wire request, then print it as it would be sent
    Request {
        /// Operation id, e.g. getStateValidators
        operation: String,

        /// Path parameter as name=value (repeatable)
        #[clap(long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,

        /// Form-encoded query string
        #[clap(long)]
        query: Option<String>,

        /// JSON request body
        #[clap(long)]
        body: Option<String>,
    },

    /// Decode a response body and re-encode it in the other format
    Transcode {
        /// Operation id, e.g. getStateValidatorBalances
        operation: String,

        /// Format of the input body
        #[clap(long)]
        from: ResponseFormat,

        /// File holding the body; binary input may also be 0x-prefixed hex
        #[clap(long)]
        input: PathBuf,

        /// Eth-Execution-Optimistic flag of a binary input
        #[clap(long)]
        execution_optimistic: bool,

        /// Eth-Finalized flag of a binary input
        #[clap(long)]
        finalized: bool,
    },
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{s}'"))?;
    Ok((key.to_owned(), value.to_owned()))
}
