//! # watch_registry
//!
//! Watches `NewResolver` events of the ENS registry while a background task
//! plays the part of the node, emitting resolver changes into an in-memory
//! log source. Demonstrates watcher cancellation, structured logging and
//! OpenTelemetry counters.
//!
//! ```sh
//! cargo run --bin watch_registry
//! LOG_JSON=1 cargo run --bin watch_registry
//! ```

use alloy_primitives::{address, keccak256, Address, B256};
use anyhow::Result;
use enslogs_contracts::{registry::NewResolver, EnsRegistry};
use enslogs_core::{ContractEvent, MemoryLogSource, SourceError};
use enslogs_observability::{init_tracing, EnsLogsMetrics, LogConfig, LogFormat};
use enslogs_stream::StreamConfig;
use opentelemetry::global;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{info, warn};

const REGISTRY: Address = address!("00000000000c2e074ec69a0dfb2997ba6c7d2e1e");
const PUBLIC_RESOLVER: Address = address!("4976fb03c32e5b8cfe2b6ccb31c09ba78ebaba41");
const EVENTS_TO_WATCH: usize = 5;

fn node(label: &str) -> B256 {
    let eth = keccak256([B256::ZERO.as_slice(), keccak256("eth").as_slice()].concat());
    keccak256([eth.as_slice(), keccak256(label).as_slice()].concat())
}

/// Emit one resolver change per tick, then drop the connection.
async fn play_node(source: MemoryLogSource, ticks: u64) -> Result<()> {
    let mut interval = tokio::time::interval(Duration::from_millis(200));
    for block in 1..=ticks {
        interval.tick().await;
        let log = NewResolver {
            node: node(&format!("user{block}")),
            resolver: PUBLIC_RESOLVER,
        }
        .encode_log(REGISTRY)?
        .at_block(20_000_000 + block);
        source.emit(log);
    }
    source.fail_subscriptions(SourceError::Other("node went away".into()));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let log_config = LogConfig {
        level: "info".into(),
        overrides: [("enslogs_stream".into(), "debug".into())].into(),
        format: if std::env::var("LOG_JSON").is_ok() {
            LogFormat::Json
        } else {
            LogFormat::Text
        },
    };
    init_tracing(&log_config)?;

    let metrics = EnsLogsMetrics::new(&global::meter("enslogs-demos"));
    let config = StreamConfig::default();
    let source = MemoryLogSource::with_capacity(config.live_capacity);
    let registry = EnsRegistry::new(REGISTRY, Arc::new(source.clone()));

    let (tx, mut rx) = config.sink::<NewResolver>();
    let mut handle = registry
        .watch_logs::<NewResolver>(&config.watch_opts(), tx, NewResolver::rules(&[]))
        .await?;
    let node_task = tokio::spawn(play_node(source, EVENTS_TO_WATCH as u64 + 3));

    println!("─── Watching NewResolver (Ctrl-C to stop) ───");
    let mut count = 0usize;
    while count < EVENTS_TO_WATCH {
        tokio::select! {
            _ = signal::ctrl_c() => break,
            next = rx.recv() => match next {
                Some(log) => {
                    count += 1;
                    metrics.record_delivered("EnsRegistry", NewResolver::NAME);
                    println!(
                        "[#{count}] block #{} | node {} → resolver {}",
                        log.block_number(),
                        log.event.node,
                        log.event.resolver
                    );
                }
                None => break,
            },
        }
    }

    handle.cancel();
    match handle.wait().await {
        Ok(()) => info!("watcher stopped after {count} events"),
        Err(err) => {
            warn!("watcher ended with error: {err}");
            metrics.record_error("EnsRegistry", NewResolver::NAME, &err);
        }
    }
    node_task.await??;
    Ok(())
}
