// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::io::{self, Stderr};

use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::fmt::format::{DefaultFields, Format};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

/// Output format of the log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Coloured,
    Plain,
    Json,
}

impl LogFormat {
    /// Unknown names fall back to [`LogFormat::Coloured`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "json" => Self::Json,
            "plain" => Self::Plain,
            _ => Self::Coloured,
        }
    }
}

pub struct Log {
    level: tracing::Level,
    filter: String,
    format: LogFormat,
}

impl Log {
    pub fn new(level: tracing::Level, filter: String) -> Self {
        Self {
            level,
            filter,
            format: LogFormat::Coloured,
        }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    fn subscriber(
        &self,
    ) -> SubscriberBuilder<DefaultFields, Format, EnvFilter, fn() -> Stderr>
    {
        // The level is a default; directives in `filter` refine it per
        // target.
        tracing_subscriber::fmt::Subscriber::builder()
            .with_env_filter(
                EnvFilter::new(self.filter.as_str())
                    .add_directive(self.level.into()),
            )
            .with_writer(io::stderr as fn() -> Stderr)
    }

    /// Installs the subscriber for the rest of the process.
    pub fn register(self) -> Result<(), SetGlobalDefaultError> {
        let subscriber = self.subscriber();
        match self.format {
            LogFormat::Json => {
                let subscriber = subscriber
                    .json()
                    .with_current_span(false)
                    .flatten_event(true)
                    .finish();
                tracing::subscriber::set_global_default(subscriber)
            }
            LogFormat::Plain => {
                let subscriber = subscriber.with_ansi(false).finish();
                tracing::subscriber::set_global_default(subscriber)
            }
            LogFormat::Coloured => {
                tracing::subscriber::set_global_default(subscriber.finish())
            }
        }
    }
}
