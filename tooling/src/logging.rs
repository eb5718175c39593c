// Copyright 2022 Xayn AG
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, version 3.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Tracing setup of `news_client`.
//!
//! Stdout carries the printed API responses, so events are written as json
//! lines to stderr and optionally to a log file.

use std::{
    fs::OpenOptions,
    io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{error, Dispatch};
use tracing_subscriber::{
    filter::{LevelFilter, ParseError, Targets},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

mod serde_level_filter {
    use serde::{
        de::{Deserialize, Deserializer, Error},
        ser::{Serialize, Serializer},
    };
    use tracing_subscriber::filter::LevelFilter;

    #[allow(clippy::trivially_copy_pass_by_ref)] // required by serde
    pub(super) fn serialize<S>(level: &LevelFilter, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        level.to_string().serialize(serializer)
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<LevelFilter, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).and_then(|level| {
            level
                .parse::<LevelFilter>()
                .map_err(|error| D::Error::custom(error.to_string()))
        })
    }
}

/// The `[logging]` section of the client config.
#[derive(Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Also write the events to this file, set by `--log-file`.
    ///
    /// The file is truncated on every run.
    pub file: Option<PathBuf>,
    /// Level of targets not listed in `targets`.
    #[serde(with = "serde_level_filter")]
    pub level: LevelFilter,
    /// Comma separated `target=level` directives, e.g. `dailynews_providers=trace`.
    ///
    /// Quiets the connection internals of the http client by default.
    pub targets: String,
    pub install_panic_hook: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: None,
            level: LevelFilter::INFO,
            targets: "hyper=warn,rustls=warn".into(),
            install_panic_hook: true,
        }
    }
}

impl Config {
    /// Per target filter with `level` as fallback.
    pub fn target_filter(&self) -> Result<Targets, ParseError> {
        let targets = if self.targets.trim().is_empty() {
            Targets::new()
        } else {
            self.targets.parse()?
        };
        Ok(targets.with_default(self.level))
    }
}

/// Initializes the logging of the client.
///
/// Fails on invalid `targets` directives or if logging was already
/// initialized. A log file which can't be opened is reported on stderr
/// and skipped.
pub fn initialize_global(config: &Config) -> Result<()> {
    let targets = config
        .target_filter()
        .with_context(|| format!("Invalid logging targets: {}", config.targets))?;
    create_trace_dispatch(targets, config.file.as_deref())
        .try_init()
        .context("Logging is already initialized")?;
    if config.install_panic_hook {
        init_panic_logging();
    }
    Ok(())
}

fn create_trace_dispatch(targets: Targets, file: Option<&Path>) -> Dispatch {
    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .json()
        .flatten_event(true)
        .with_current_span(false);

    let file_log = file.and_then(|file| {
        OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(file)
            .map_err(|error| eprintln!("Setup file logging failed: {error}"))
            .ok()
            .map(|writer| {
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .json()
            })
    });

    tracing_subscriber::registry()
        .with(stderr_log)
        .with(file_log)
        .with(targets)
        .into()
}

fn init_panic_logging() {
    std::panic::set_hook(Box::new(|panic| {
        if let Some(location) = panic.location() {
            error!(
                message = %panic,
                panic.file = location.file(),
                panic.line = location.line(),
                panic.column = location.column(),
            );
        } else {
            error!(message = %panic);
        }
    }));
}
