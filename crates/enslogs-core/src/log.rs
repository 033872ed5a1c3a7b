//! Raw log records as delivered by a log source.

use alloy_primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};

/// A raw, undecoded contract log as received from a node.
/// This is the input to every event decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLog {
    /// Contract address that emitted the log
    pub address: Address,
    /// topics[0] is the event selector for non-anonymous events;
    /// the remaining topics are the indexed arguments.
    pub topics: Vec<B256>,
    /// ABI-encoded non-indexed arguments
    pub data: Bytes,
    /// Block in which the transaction was included
    pub block_number: u64,
    /// Hash of the block in which the transaction was included
    pub block_hash: B256,
    /// Hash of the transaction
    pub transaction_hash: B256,
    /// Index of the transaction in the block
    pub transaction_index: u64,
    /// Index of the log in the block
    pub log_index: u64,
    /// `true` if the log was reverted by a chain reorganisation
    #[serde(default)]
    pub removed: bool,
}

impl RawLog {
    /// Create a log with the given address, topics and data and zeroed provenance.
    pub fn new(address: Address, topics: Vec<B256>, data: impl Into<Bytes>) -> Self {
        Self {
            address,
            topics,
            data: data.into(),
            ..Default::default()
        }
    }

    /// Set the block number.
    pub fn at_block(mut self, block_number: u64) -> Self {
        self.block_number = block_number;
        self
    }

    /// Set the transaction hash and log index.
    pub fn with_position(mut self, transaction_hash: B256, log_index: u64) -> Self {
        self.transaction_hash = transaction_hash;
        self.log_index = log_index;
        self
    }

    /// Returns topics[0], the event selector of a non-anonymous event.
    pub fn selector(&self) -> Option<&B256> {
        self.topics.first()
    }
}
