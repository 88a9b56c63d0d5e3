// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! # State API Configuration
//!
//! ## Configuration Sources (in order of precedence)
//!
//! 1. Environment variables (prefixed with `STATE_API_`)
//! 2. Configuration file (if specified)
//! 3. Default values
//!
//! ## Example
//!
//! ```toml
//! base_url = "http://127.0.0.1:5052"
//! response_format = "ssz"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::response::ResponseFormat;

const ENV_PREFIX: &str = "STATE_API_";
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5052";

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error reading configuration file
    #[error("Failed to read configuration file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Error parsing TOML
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Error serializing to TOML
    #[error("Failed to serialize to TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Error parsing environment variable
    #[error("Failed to parse environment variable {0}: {1}")]
    EnvParse(String, String),

    /// Validation error
    #[error("Configuration validation error: {0}")]
    Validation(String),
}

impl ConfigError {
    fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Client-side settings of the state-query API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Node endpoint requests are resolved against
    pub base_url: String,

    /// Format requested through the `Accept` header
    pub response_format: ResponseFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            response_format: ResponseFormat::default(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: ApiConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables over the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env()
    }

    /// Overrides fields from the process environment and validates the
    /// result.
    pub fn with_env(mut self) -> Result<Self, ConfigError> {
        self.apply_env(|name| std::env::var(name).ok())?;
        self.validate()?;
        Ok(self)
    }

    /// Load configuration with the following precedence:
    /// 1. Environment variables
    /// 2. Config file (if specified and present)
    /// 3. Default values
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) if path.exists() => Self::from_file(path)?,
            _ => Self::default(),
        };
        config.with_env()
    }

    /// Overrides fields from the variables found through `lookup`.
    fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_env = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(base_url) = get_env("BASE_URL") {
            self.base_url = base_url;
        }
        if let Some(format) = get_env("RESPONSE_FORMAT") {
            self.response_format = format.parse().map_err(|e| {
                ConfigError::EnvParse(
                    format!("{ENV_PREFIX}RESPONSE_FORMAT"),
                    e,
                )
            })?;
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Parsed base URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.base_url).map_err(|e| {
            ConfigError::validation(format!(
                "base_url '{}' is not a valid URL: {e}",
                self.base_url
            ))
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::validation(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if url.cannot_be_a_base() {
            return Err(ConfigError::validation(
                "base_url cannot be used as a base",
            ));
        }
        Ok(())
    }
}
