//! In-memory `LogSource` implementation.
//!
//! Suitable for testing, demos, and embedded deployments that receive logs
//! from somewhere other than a node. Thread-safe via `Arc<Mutex<Inner>>`.

use crate::error::SourceError;
use crate::filter::{FilterOpts, FilterSpec, WatchOpts};
use crate::log::RawLog;
use crate::source::{subscription, LiveLogs, LogSource, SubscriptionFeed, DEFAULT_LIVE_CAPACITY};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

struct LiveEntry {
    filter: FilterSpec,
    start: Option<u64>,
    feed: SubscriptionFeed,
}

#[derive(Default)]
struct Inner {
    /// Logs answered by historical queries, in insertion order
    history: Vec<RawLog>,
    /// Open live subscriptions
    live: Vec<LiveEntry>,
    /// Error returned by the next historical query
    query_error: Option<SourceError>,
    /// Error returned by the next subscribe call
    subscribe_error: Option<SourceError>,
}

impl Inner {
    fn prune_closed(&mut self) {
        self.live.retain(|entry| !entry.feed.is_closed());
    }
}

/// Thread-safe in-memory log source.
#[derive(Clone)]
pub struct MemoryLogSource {
    inner: Arc<Mutex<Inner>>,
    live_capacity: usize,
}

impl Default for MemoryLogSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryLogSource {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LIVE_CAPACITY)
    }

    /// Create a source whose live subscriptions buffer up to `live_capacity` logs.
    pub fn with_capacity(live_capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            live_capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append a log to the history answered by `query_historical`.
    pub fn push_historical(&self, log: RawLog) {
        self.lock().history.push(log);
    }

    /// Append several logs to the history.
    pub fn extend_historical(&self, logs: impl IntoIterator<Item = RawLog>) {
        self.lock().history.extend(logs);
    }

    /// Deliver a log to every matching live subscription.
    /// The log is also appended to the history.
    /// Returns the number of subscriptions that received it.
    ///
    /// A subscription whose buffer is full is failed with
    /// [`SourceError::Lagged`], so a consumer never sees a gap without an error.
    pub fn emit(&self, log: RawLog) -> usize {
        let mut inner = self.lock();
        inner.prune_closed();
        let mut delivered = 0;
        let mut lagged = Vec::new();
        for (i, entry) in inner.live.iter().enumerate() {
            if !entry.filter.matches(&log) || entry.start.is_some_and(|s| log.block_number < s) {
                continue;
            }
            match entry.feed.try_send(log.clone()) {
                Ok(()) => delivered += 1,
                Err(err @ SourceError::Lagged { .. }) => lagged.push((i, err)),
                Err(e) => debug!("skipping live log for {}: {e}", entry.filter.event),
            }
        }
        for (i, err) in lagged.into_iter().rev() {
            let entry = inner.live.remove(i);
            warn!("failing lagged subscription for {}: {err}", entry.filter.event);
            entry.feed.fail(err);
        }
        inner.history.push(log);
        delivered
    }

    /// Terminate every open live subscription with `error`.
    pub fn fail_subscriptions(&self, error: SourceError) {
        let live = std::mem::take(&mut self.lock().live);
        debug!("failing {} live subscriptions: {error}", live.len());
        for entry in live {
            entry.feed.fail(error.clone());
        }
    }

    /// Terminate every open live subscription cleanly.
    pub fn complete_subscriptions(&self) {
        let live = std::mem::take(&mut self.lock().live);
        for entry in live {
            entry.feed.complete();
        }
    }

    /// Make the next historical query fail with `error`.
    pub fn fail_next_query(&self, error: SourceError) {
        self.lock().query_error = Some(error);
    }

    /// Make the next subscribe call fail with `error`.
    pub fn fail_next_subscribe(&self, error: SourceError) {
        self.lock().subscribe_error = Some(error);
    }

    /// Number of live subscriptions still held by a consumer.
    pub fn live_subscriptions(&self) -> usize {
        let mut inner = self.lock();
        inner.prune_closed();
        inner.live.len()
    }

    /// Number of logs in the history.
    pub fn len(&self) -> usize {
        self.lock().history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LogSource for MemoryLogSource {
    async fn query_historical(
        &self,
        filter: &FilterSpec,
        opts: &FilterOpts,
    ) -> Result<Vec<RawLog>, SourceError> {
        let mut inner = self.lock();
        if let Some(err) = inner.query_error.take() {
            return Err(err);
        }
        Ok(inner
            .history
            .iter()
            .filter(|log| opts.contains(log.block_number) && filter.matches(log))
            .cloned()
            .collect())
    }

    async fn subscribe_live(
        &self,
        filter: &FilterSpec,
        opts: &WatchOpts,
    ) -> Result<LiveLogs, SourceError> {
        let mut inner = self.lock();
        if let Some(err) = inner.subscribe_error.take() {
            return Err(err);
        }
        let (live, feed) = subscription(self.live_capacity);
        inner.live.push(LiveEntry {
            filter: filter.clone(),
            start: opts.start,
            feed,
        });
        debug!("live subscription opened for {}", filter.event);
        Ok(live)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, Bytes, B256};

    fn spec() -> FilterSpec {
        FilterSpec::new(Address::ZERO, "Test", Some(B256::repeat_byte(1)), 0, vec![]).unwrap()
    }

    fn log(block: u64) -> RawLog {
        RawLog::new(Address::ZERO, vec![B256::repeat_byte(1)], Bytes::new()).at_block(block)
    }

    #[tokio::test]
    async fn query_respects_range_and_filter() {
        let source = MemoryLogSource::new();
        source.extend_historical([log(1), log(5), log(9)]);
        let mut other = log(5);
        other.topics[0] = B256::repeat_byte(2);
        source.push_historical(other);

        let opts = FilterOpts::range(2, 9).unwrap();
        let logs = source.query_historical(&spec(), &opts).await.unwrap();
        let blocks: Vec<_> = logs.iter().map(|l| l.block_number).collect();
        assert_eq!(blocks, vec![5, 9]);
    }

    #[tokio::test]
    async fn injected_query_error_fires_once() {
        let source = MemoryLogSource::new();
        source.fail_next_query(SourceError::Closed);
        let opts = FilterOpts::default();
        assert!(source.query_historical(&spec(), &opts).await.is_err());
        assert!(source.query_historical(&spec(), &opts).await.is_ok());
    }

    #[tokio::test]
    async fn emit_reaches_matching_subscriptions() {
        let source = MemoryLogSource::new();
        let mut live = source.subscribe_live(&spec(), &WatchOpts::default()).await.unwrap();
        assert_eq!(source.emit(log(3)), 1);
        assert_eq!(live.logs.recv().await.unwrap().block_number, 3);
        assert_eq!(source.len(), 1);

        drop(live);
        assert_eq!(source.live_subscriptions(), 0);
        assert_eq!(source.emit(log(4)), 0);
    }

    #[tokio::test]
    async fn full_buffer_fails_subscription() {
        let source = MemoryLogSource::with_capacity(1);
        let mut live = source.subscribe_live(&spec(), &WatchOpts::default()).await.unwrap();
        assert_eq!(source.emit(log(1)), 1);
        assert_eq!(source.emit(log(2)), 0);
        assert_eq!(source.live_subscriptions(), 0);

        assert_eq!(
            live.subscription.err().await,
            Some(SourceError::Lagged { capacity: 1 })
        );
        assert_eq!(live.logs.recv().await.unwrap().block_number, 1);
        assert!(live.logs.recv().await.is_none());
    }

    #[tokio::test]
    async fn fail_subscriptions_reaches_consumer() {
        let source = MemoryLogSource::new();
        let mut live = source.subscribe_live(&spec(), &WatchOpts::default()).await.unwrap();
        source.fail_subscriptions(SourceError::Other("node went away".into()));
        assert_eq!(
            live.subscription.err().await,
            Some(SourceError::Other("node went away".into()))
        );
    }
}
