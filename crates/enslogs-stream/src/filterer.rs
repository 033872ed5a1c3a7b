//! `BoundFilterer`: log filtering and watching for one deployed contract.

use crate::iterator::LogIterator;
use crate::watcher::{self, WatchHandle};
use alloy_primitives::Address;
use enslogs_core::{
    error::StreamError,
    event::{ContractEvent, EventLog},
    filter::{FilterOpts, FilterSpec, TopicRule, WatchOpts},
    source::LogSource,
};
use std::sync::Arc;
use tokio::sync::mpsc;

/// A contract address bound to a log source.
#[derive(Clone)]
pub struct BoundFilterer {
    address: Address,
    source: Arc<dyn LogSource>,
}

impl BoundFilterer {
    pub fn new(address: Address, source: Arc<dyn LogSource>) -> Self {
        Self { address, source }
    }

    /// Address of the bound contract.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The filter for event `E` with one rule per indexed argument.
    pub fn filter_spec<E: ContractEvent>(&self, rules: Vec<TopicRule>) -> Result<FilterSpec, StreamError> {
        Ok(FilterSpec::for_event::<E>(self.address, rules)?)
    }

    /// Iterate over past (and, without an end block, future) `E` logs.
    pub async fn filter_logs<E: ContractEvent>(
        &self,
        opts: &FilterOpts,
        rules: Vec<TopicRule>,
    ) -> Result<LogIterator<E>, StreamError> {
        let filter = self.filter_spec::<E>(rules)?;
        LogIterator::open(self.source.as_ref(), &filter, opts).await
    }

    /// Forward future `E` logs into `sink` from a background task.
    pub async fn watch_logs<E: ContractEvent>(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventLog<E>>,
        rules: Vec<TopicRule>,
    ) -> Result<WatchHandle, StreamError> {
        let filter = self.filter_spec::<E>(rules)?;
        watcher::watch(self.source.as_ref(), &filter, opts, sink).await
    }
}

impl std::fmt::Debug for BoundFilterer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundFilterer")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
