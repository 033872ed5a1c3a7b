//! # replay_history
//!
//! Replays the ENS registry history of the `.eth` node from an in-memory log
//! source: every subnode whose owner changed inside a bounded block range.
//!
//! The block range comes from a YAML `StreamConfig`; pass a path as the first
//! argument to override the built-in one:
//! ```sh
//! cargo run --bin replay_history
//! cargo run --bin replay_history -- my-range.yaml
//! ```

use alloy_primitives::{address, keccak256, Address, B256};
use anyhow::{bail, Result};
use enslogs_contracts::{registry::NewOwner, EnsRegistry};
use enslogs_core::MemoryLogSource;
use enslogs_observability::{init_tracing, LogConfig};
use enslogs_stream::StreamConfig;
use std::sync::Arc;
use tracing::info;

const REGISTRY: Address = address!("00000000000c2e074ec69a0dfb2997ba6c7d2e1e");

const DEFAULT_CONFIG: &str = r#"
start_block: 9380380
end_block: 9380500
"#;

fn namehash_eth() -> B256 {
    keccak256([B256::ZERO.as_slice(), keccak256("eth").as_slice()].concat())
}

/// Populate a source with a handful of registrations around the range.
fn seed(source: &MemoryLogSource) -> Result<()> {
    let registrations = [
        ("vitalik", 0xd8, 9_380_380),
        ("nick", 0xb8, 9_380_410),
        ("brantly", 0x98, 9_380_455),
        ("alice", 0x11, 9_380_499),
        ("late", 0x22, 9_380_600),
    ];
    for (label, owner_byte, block) in registrations {
        let log = NewOwner {
            node: namehash_eth(),
            label: keccak256(label),
            owner: Address::repeat_byte(owner_byte),
        }
        .encode_log(REGISTRY)?
        .at_block(block);
        source.push_historical(log);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(&LogConfig::default())?;

    let config = match std::env::args().nth(1) {
        Some(path) => StreamConfig::from_yaml(&std::fs::read_to_string(path)?)?,
        None => StreamConfig::from_yaml(DEFAULT_CONFIG)?,
    };
    let opts = config.filter_opts()?;
    if opts.end.is_none() {
        bail!("replay_history needs an end_block; use watch_registry to follow the chain");
    }

    let source = MemoryLogSource::with_capacity(config.live_capacity);
    seed(&source)?;
    info!("seeded {} historical logs", source.len());

    let registry = EnsRegistry::new(REGISTRY, Arc::new(source));
    let mut iter = registry
        .filter_logs::<NewOwner>(&opts, NewOwner::rules(&[namehash_eth()], &[]))
        .await?;

    println!("─── NewOwner events under .eth ({:?}) ───", opts);
    let mut count = 0usize;
    while iter.advance().await {
        if let Some(log) = iter.current() {
            count += 1;
            println!(
                "[#{count}] block #{} | label {} | owner {}",
                log.block_number(),
                log.event.label,
                log.event.owner
            );
        }
    }
    if let Some(err) = iter.fault() {
        bail!("replay stopped early: {err}");
    }
    println!("Replayed {count} events");
    Ok(())
}
