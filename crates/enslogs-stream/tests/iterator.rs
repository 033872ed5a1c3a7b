mod common;

use common::*;
use enslogs_core::{
    error::{SourceError, StreamError},
    filter::{topic_rule, FilterOpts},
    memory::MemoryLogSource,
};
use enslogs_stream::LogIterator;
use futures::StreamExt;
use std::time::Duration;

async fn open(source: &MemoryLogSource, opts: FilterOpts) -> LogIterator<Ping> {
    LogIterator::open(source, &any_ping(), &opts).await.unwrap()
}

fn seq(iter: &LogIterator<Ping>) -> u64 {
    iter.current().expect("current event").event.seq
}

#[tokio::test]
async fn history_precedes_live_in_source_order() {
    let source = MemoryLogSource::new();
    source.extend_historical([ping(1), ping(2), ping(3)]);
    let mut iter = open(&source, FilterOpts::default()).await;

    // Emitted after the iterator opened, so only the live phase sees it
    assert_eq!(source.emit(ping(4)), 1);

    let mut seen = Vec::new();
    for _ in 0..4 {
        assert!(iter.advance().await);
        seen.push(seq(&iter));
    }
    assert_eq!(seen, vec![1, 2, 3, 4]);

    source.complete_subscriptions();
    assert!(!iter.advance().await);
    assert!(iter.fault().is_none());
    assert!(iter.current().is_none());
}

#[tokio::test]
async fn history_live_then_error() {
    let source = MemoryLogSource::new();
    source.extend_historical([ping(10), ping(11)]);
    let mut iter = open(&source, FilterOpts::default()).await;

    source.emit(ping(12));
    source.fail_subscriptions(SourceError::Other("connection reset".into()));

    assert!(iter.advance().await);
    assert_eq!(seq(&iter), 10);
    assert!(iter.advance().await);
    assert_eq!(seq(&iter), 11);
    // Buffered ahead of the error, still delivered
    assert!(iter.advance().await);
    assert_eq!(seq(&iter), 12);

    assert!(!iter.advance().await);
    assert_eq!(
        iter.fault(),
        Some(&StreamError::Source(SourceError::Other("connection reset".into())))
    );
}

#[tokio::test]
async fn fault_is_sticky_and_never_blocks() {
    let source = MemoryLogSource::new();
    let mut iter = open(&source, FilterOpts::default()).await;
    source.fail_subscriptions(SourceError::Closed);

    assert!(!iter.advance().await);
    assert!(iter.fault().is_some());
    for _ in 0..3 {
        let next = tokio::time::timeout(Duration::from_millis(50), iter.advance())
            .await
            .expect("advance must not block after a fault");
        assert!(!next);
        assert!(iter.fault().is_some());
    }
    assert_eq!(source.live_subscriptions(), 0);
}

#[tokio::test]
async fn decode_failure_hides_later_logs() {
    let source = MemoryLogSource::new();
    source.extend_historical([ping(1), malformed(2), ping(3)]);
    let mut iter = open(&source, FilterOpts::default()).await;
    source.emit(ping(4));

    assert!(iter.advance().await);
    assert_eq!(seq(&iter), 1);
    assert!(!iter.advance().await);
    assert!(iter.fault().is_some_and(StreamError::is_decode));

    assert!(!iter.advance().await);
    assert!(iter.current().is_none());
    // Faulting releases the live subscription
    assert_eq!(source.live_subscriptions(), 0);
}

#[tokio::test]
async fn decode_failure_in_live_phase() {
    let source = MemoryLogSource::new();
    let mut iter = open(&source, FilterOpts::default()).await;
    source.emit(malformed(5));
    source.emit(ping(6));

    assert!(!iter.advance().await);
    assert!(iter.fault().is_some_and(StreamError::is_decode));
    assert!(!iter.advance().await);
}

#[tokio::test]
async fn bounded_range_skips_live_phase() {
    let source = MemoryLogSource::new();
    source.extend_historical((1..=6).map(ping));
    let mut iter = open(&source, FilterOpts::range(2, 4).unwrap()).await;
    assert_eq!(source.live_subscriptions(), 0);

    let mut seen = Vec::new();
    while iter.advance().await {
        seen.push(seq(&iter));
    }
    assert_eq!(seen, vec![2, 3, 4]);
    assert!(iter.fault().is_none());
}

#[tokio::test]
async fn start_block_applies_to_history() {
    let source = MemoryLogSource::new();
    source.extend_historical((1..=5).map(ping));
    let mut iter = open(&source, FilterOpts::from_block(4)).await;
    assert!(iter.advance().await);
    assert_eq!(seq(&iter), 4);
    assert!(iter.advance().await);
    assert_eq!(seq(&iter), 5);
    iter.close();
    assert!(!iter.advance().await);
}

#[tokio::test]
async fn indexed_rules_filter_history_and_live() {
    let source = MemoryLogSource::new();
    source.extend_historical([ping_from(alice(), 1), ping_from(bob(), 2)]);
    let filter = ping_filter(vec![topic_rule(&[bob()])]);
    let mut iter: LogIterator<Ping> =
        LogIterator::open(&source, &filter, &FilterOpts::default()).await.unwrap();

    source.emit(ping_from(alice(), 3));
    source.emit(ping_from(bob(), 4));
    source.complete_subscriptions();

    let mut seen = Vec::new();
    while iter.advance().await {
        let event = &iter.current().unwrap().event;
        assert_eq!(event.from, bob());
        seen.push(event.seq);
    }
    assert_eq!(seen, vec![2, 4]);
}

#[tokio::test]
async fn close_is_idempotent() {
    let source = MemoryLogSource::new();
    let mut iter = open(&source, FilterOpts::default()).await;
    assert_eq!(source.live_subscriptions(), 1);

    iter.close();
    iter.close();
    assert_eq!(source.live_subscriptions(), 0);
    assert!(!iter.advance().await);
    assert!(iter.fault().is_none());
}

#[tokio::test]
async fn subscribe_failure_is_reported_on_open() {
    let source = MemoryLogSource::new();
    source.fail_next_subscribe(SourceError::SubscriptionFailed {
        reason: "filter not supported".into(),
    });
    let err = LogIterator::<Ping>::open(&source, &any_ping(), &FilterOpts::default())
        .await
        .unwrap_err();
    assert!(err.is_source());
}

#[tokio::test]
async fn query_failure_releases_live_subscription() {
    let source = MemoryLogSource::new();
    source.fail_next_query(SourceError::QueryFailed {
        reason: "block range too large".into(),
    });
    let err = LogIterator::<Ping>::open(&source, &any_ping(), &FilterOpts::default())
        .await
        .unwrap_err();
    assert!(err.is_source());
    assert_eq!(source.live_subscriptions(), 0);
}

#[tokio::test]
async fn drains_buffer_after_error_observed_first() {
    let (live, feed) = live_pair(4);
    feed.try_send(ping(7)).unwrap();
    feed.try_send(ping(8)).unwrap();
    feed.fail(SourceError::Closed);

    let mut iter = LogIterator::<Ping>::from_parts(vec![], Some(live));
    assert!(iter.advance().await);
    assert_eq!(seq(&iter), 7);
    // The error has been seen already but is only reported with the final `false`
    assert!(iter.fault().is_none());
    assert!(iter.advance().await);
    assert_eq!(seq(&iter), 8);
    assert!(iter.fault().is_none());
    assert!(!iter.advance().await);
    assert_eq!(iter.fault(), Some(&StreamError::Source(SourceError::Closed)));
    assert!(!iter.advance().await);
}

#[tokio::test]
async fn live_buffer_overflow_surfaces_as_fault() {
    let source = MemoryLogSource::with_capacity(2);
    source.push_historical(ping(1));
    let mut iter = open(&source, FilterOpts::default()).await;

    // Nobody reads while the iterator is still in history: 4 overflows
    for n in 2..=5 {
        source.emit(ping(n));
    }
    source.complete_subscriptions();

    let mut seen = Vec::new();
    while iter.advance().await {
        seen.push(seq(&iter));
    }
    assert_eq!(seen, vec![1, 2, 3]);
    assert_eq!(
        iter.fault(),
        Some(&StreamError::Source(SourceError::Lagged { capacity: 2 }))
    );
}

#[tokio::test]
async fn into_stream_ends_with_fault() {
    let source = MemoryLogSource::new();
    source.extend_historical([ping(1), ping(2)]);
    let iter = open(&source, FilterOpts::default()).await;
    source.fail_subscriptions(SourceError::Closed);

    let items: Vec<_> = iter.into_stream().collect().await;
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].as_ref().unwrap().event.seq, 1);
    assert_eq!(items[1].as_ref().unwrap().event.seq, 2);
    assert_eq!(items[2], Err(StreamError::Source(SourceError::Closed)));
}
