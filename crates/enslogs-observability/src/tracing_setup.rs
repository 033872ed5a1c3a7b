//! Subscriber setup for binaries embedding enslogs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter, Layer,
};

/// Output encoding of the fmt layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Which log lines are kept and how they are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_level")]
    pub level: String,
    /// Per-crate levels, keyed by crate name (`enslogs-stream` or `enslogs_stream`)
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "info".into()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            overrides: BTreeMap::new(),
            format: LogFormat::default(),
        }
    }
}

impl LogConfig {
    /// The `EnvFilter` directive string, e.g. `"info,enslogs_stream=debug"`.
    pub fn directives(&self) -> String {
        self.overrides
            .iter()
            .fold(self.level.clone(), |mut acc, (target, level)| {
                acc.push(',');
                acc.push_str(&target.replace('-', "_"));
                acc.push('=');
                acc.push_str(level);
                acc
            })
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(self.directives()))
            .unwrap_or_else(|_| EnvFilter::new(default_level()))
    }
}

/// Install the global subscriber. `RUST_LOG`, when set, replaces the
/// configured levels.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &LogConfig) -> Result<(), TryInitError> {
    let output = match config.format {
        LogFormat::Json => fmt::layer().json().boxed(),
        LogFormat::Text => fmt::layer().boxed(),
    };
    tracing_subscriber::registry()
        .with(output)
        .with(config.env_filter())
        .try_init()
}
