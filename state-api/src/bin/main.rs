// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

mod args;
mod command;
mod config;
mod log;

use clap::Parser;
use state_api::ExecutionMeta;

use crate::args::{Args, Command};
use crate::config::Config;
use crate::log::{Log, LogFormat};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = Config::try_from(&args)?;

    Log::new(config.log_level()?, config.log_filter())
        .with_format(LogFormat::from_name(&config.log_type()))
        .register()?;

    match args.command {
        Command::Routes => command::routes(),
        Command::Request {
            operation,
            params,
            query,
            body,
        } => command::request(&config.api, &operation, params, query, body)?,
        Command::Transcode {
            operation,
            from,
            input,
            execution_optimistic,
            finalized,
        } => command::transcode(
            &operation,
            from,
            &input,
            ExecutionMeta {
                execution_optimistic,
                finalized,
            },
        )?,
    }

    Ok(())
}
