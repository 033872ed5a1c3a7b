//! enslogs metrics definitions.
//!
//! All metrics use OpenTelemetry conventions and are exported by whatever
//! meter provider the host application installs.

use enslogs_core::error::{SourceError, StreamError};
use opentelemetry::{
    metrics::{Counter, Meter},
    KeyValue,
};

/// Central metrics handle for log iterators and watchers.
#[derive(Clone)]
pub struct EnsLogsMetrics {
    pub events_delivered: Counter<u64>,
    pub decode_errors: Counter<u64>,
    pub subscription_errors: Counter<u64>,
}

impl EnsLogsMetrics {
    pub fn new(meter: &Meter) -> Self {
        Self {
            events_delivered: meter
                .u64_counter("enslogs.events_delivered")
                .with_description("Decoded events handed to a consumer")
                .build(),
            decode_errors: meter
                .u64_counter("enslogs.decode_errors")
                .with_description("Logs that failed to decode and ended their stream")
                .build(),
            subscription_errors: meter
                .u64_counter("enslogs.subscription_errors")
                .with_description("Live subscriptions or log queries that failed")
                .build(),
        }
    }

    pub fn record_delivered(&self, contract: &str, event: &str) {
        self.events_delivered.add(1, &labels(contract, event));
    }

    /// Count a terminal stream error under the matching counter.
    pub fn record_error(&self, contract: &str, event: &str, error: &StreamError) {
        match error {
            StreamError::Decode(_) => self.decode_errors.add(1, &labels(contract, event)),
            StreamError::Source(source) => {
                let [c, e] = labels(contract, event);
                self.subscription_errors
                    .add(1, &[c, e, KeyValue::new("kind", source_kind(source))]);
            }
            StreamError::Filter(_) | StreamError::TaskAborted { .. } => {}
        }
    }
}

fn labels(contract: &str, event: &str) -> [KeyValue; 2] {
    [
        KeyValue::new("contract", contract.to_string()),
        KeyValue::new("event", event.to_string()),
    ]
}

fn source_kind(error: &SourceError) -> &'static str {
    match error {
        SourceError::ConnectionFailed { .. } => "connection",
        SourceError::QueryFailed { .. } => "query",
        SourceError::SubscriptionFailed { .. } => "subscription",
        SourceError::Closed => "closed",
        SourceError::Lagged { .. } => "lagged",
        SourceError::Other(_) => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enslogs_core::error::DecodeError;

    #[test]
    fn records_against_noop_meter() {
        let meter = opentelemetry::global::meter("enslogs-test");
        let metrics = EnsLogsMetrics::new(&meter);
        metrics.record_delivered("EnsRegistry", "NewOwner");
        metrics.record_error("EnsRegistry", "NewOwner", &DecodeError::MissingSignature.into());
        metrics.record_error("EnsRegistry", "NewOwner", &SourceError::Closed.into());
    }

    #[test]
    fn source_kinds() {
        assert_eq!(source_kind(&SourceError::Closed), "closed");
        assert_eq!(
            source_kind(&SourceError::QueryFailed { reason: "timeout".into() }),
            "query"
        );
    }
}
