//! Iterator and watcher configuration.

use enslogs_core::{
    error::FilterError,
    event::EventLog,
    filter::{FilterOpts, WatchOpts},
    source::DEFAULT_LIVE_CAPACITY,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("{field} must be greater than zero")]
    ZeroCapacity { field: &'static str },
}

/// Block range and channel sizing for iterators and watchers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// First block to visit; `None` means genesis for iterators and the
    /// current head for watchers
    #[serde(default)]
    pub start_block: Option<u64>,
    /// Last block to visit (inclusive); `None` keeps following live logs
    #[serde(default)]
    pub end_block: Option<u64>,
    /// Buffer of the live subscription channel
    #[serde(default = "default_live_capacity")]
    pub live_capacity: usize,
    /// Buffer of the channel decoded events are delivered into
    #[serde(default = "default_sink_capacity")]
    pub sink_capacity: usize,
}

fn default_live_capacity() -> usize { DEFAULT_LIVE_CAPACITY }
fn default_sink_capacity() -> usize { 64 }

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            start_block: None,
            end_block: None,
            live_capacity: default_live_capacity(),
            sink_capacity: default_sink_capacity(),
        }
    }
}

impl StreamConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML config.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.live_capacity == 0 {
            return Err(ConfigError::ZeroCapacity { field: "live_capacity" });
        }
        if self.sink_capacity == 0 {
            return Err(ConfigError::ZeroCapacity { field: "sink_capacity" });
        }
        self.filter_opts()?;
        Ok(())
    }

    /// Options for a historical query.
    pub fn filter_opts(&self) -> Result<FilterOpts, FilterError> {
        let start = self.start_block.unwrap_or(0);
        match self.end_block {
            Some(end) => FilterOpts::range(start, end),
            None => Ok(FilterOpts::from_block(start)),
        }
    }

    /// Options for a live subscription.
    pub fn watch_opts(&self) -> WatchOpts {
        WatchOpts {
            start: self.start_block,
        }
    }

    /// A sink channel sized for watcher delivery.
    pub fn sink<E>(&self) -> (mpsc::Sender<EventLog<E>>, mpsc::Receiver<EventLog<E>>) {
        mpsc::channel(self.sink_capacity.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_defaults() {
        let config = StreamConfig::from_json(r#"{"start_block": 9380380}"#).unwrap();
        assert_eq!(config.live_capacity, DEFAULT_LIVE_CAPACITY);
        assert_eq!(config.sink_capacity, 64);
        assert_eq!(config.filter_opts().unwrap(), FilterOpts::from_block(9_380_380));
        assert_eq!(config.watch_opts().start, Some(9_380_380));
    }

    #[test]
    fn yaml_bounded_range() {
        let yaml = "start_block: 100\nend_block: 200\nsink_capacity: 8\n";
        let config = StreamConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.filter_opts().unwrap(), FilterOpts::range(100, 200).unwrap());
        assert_eq!(config.sink_capacity, 8);
    }

    #[test]
    fn rejects_inverted_range() {
        let err = StreamConfig::from_json(r#"{"start_block": 5, "end_block": 1}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Filter(FilterError::InvalidRange { .. })));
    }

    #[test]
    fn rejects_zero_capacity() {
        let err = StreamConfig::from_yaml("sink_capacity: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroCapacity { field: "sink_capacity" }));
    }

    #[test]
    fn watch_from_head_by_default() {
        assert_eq!(StreamConfig::default().watch_opts(), WatchOpts::default());
    }
}
