// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use state_api::config::{ApiConfig, ConfigError};

use crate::args::Args;

#[derive(Serialize, Deserialize, Clone, Default)]
pub(crate) struct Config {
    log_level: Option<String>,
    log_type: Option<String>,
    log_filter: Option<String>,

    #[serde(default)]
    pub(crate) api: ApiConfig,
}

/// Default log_level.
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log_type.
const DEFAULT_LOG_TYPE: &str = "coloured";

impl TryFrom<&Args> for Config {
    type Error = ConfigError;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        let mut config = match &args.config {
            Some(path) => {
                let toml = std::fs::read_to_string(path)?;
                toml::from_str(&toml)?
            }
            None => Config::default(),
        };

        // Environment overrides the file, arguments override both
        config.api = config.api.with_env()?;

        if let Some(log_level) = args.log_level {
            config.log_level = Some(log_level.to_string());
        }
        if let Some(log_type) = &args.log_type {
            config.log_type = Some(log_type.into());
        }
        if let Some(log_filter) = &args.log_filter {
            config.log_filter = Some(log_filter.into());
        }
        if let Some(base_url) = &args.base_url {
            config.api.base_url = base_url.into();
            config.api.validate()?;
        }

        Ok(config)
    }
}

impl Config {
    pub(crate) fn log_type(&self) -> String {
        match &self.log_type {
            None => DEFAULT_LOG_TYPE.into(),
            Some(log_type) => log_type.into(),
        }
    }

    pub(crate) fn log_level(&self) -> Result<tracing::Level, ConfigError> {
        let log_level = match &self.log_level {
            None => DEFAULT_LOG_LEVEL,
            Some(log_level) => log_level,
        };
        tracing::Level::from_str(log_level).map_err(|e| {
            ConfigError::Validation(format!(
                "Invalid log-level specified '{log_level}' - {e}"
            ))
        })
    }

    pub(crate) fn log_filter(&self) -> String {
        self.log_filter.clone().unwrap_or_default()
    }
}
