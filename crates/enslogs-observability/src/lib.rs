//! # enslogs-observability
//!
//! OpenTelemetry-based observability for enslogs iterators and watchers.
//!
//! ## Built-in metrics
//! - `enslogs.events_delivered`    counter, tagged with contract + event
//! - `enslogs.decode_errors`       counter, tagged with contract + event
//! - `enslogs.subscription_errors` counter, tagged with contract + event + kind
//!
//! ## Structured logging
//! JSON-structured or human-readable logs, levels configurable per crate.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::EnsLogsMetrics;
pub use tracing_setup::{init_tracing, LogConfig, LogFormat};
