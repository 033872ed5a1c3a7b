//! Filter construction: indexed-argument values → topic-matching filter.
//!
//! # Topic encoding of indexed arguments
//! - **Value types** (address, bool, integers) are left-padded to 32 bytes.
//! - **Fixed byte arrays** (`bytes4`, ...) are right-padded to 32 bytes.
//! - **Reference types** (`string`, `bytes`) are stored as the keccak256 of
//!   their contents, so filtering on them means filtering on the hash.
//! - A `B256` is taken as an already-encoded topic.

use crate::error::FilterError;
use crate::event::ContractEvent;
use crate::log::RawLog;
use alloy_primitives::{keccak256, Address, Bytes, FixedBytes, B256, U256};
use serde::{Deserialize, Serialize};

/// Values that can appear as an indexed argument in a topic filter.
pub trait TopicEncode {
    fn to_topic(&self) -> B256;
}

impl TopicEncode for B256 {
    fn to_topic(&self) -> B256 {
        *self
    }
}

impl TopicEncode for Address {
    fn to_topic(&self) -> B256 {
        self.into_word()
    }
}

impl TopicEncode for U256 {
    fn to_topic(&self) -> B256 {
        B256::from(self.to_be_bytes::<32>())
    }
}

impl TopicEncode for u64 {
    fn to_topic(&self) -> B256 {
        U256::from(*self).to_topic()
    }
}

impl TopicEncode for u8 {
    fn to_topic(&self) -> B256 {
        U256::from(*self).to_topic()
    }
}

impl TopicEncode for bool {
    fn to_topic(&self) -> B256 {
        U256::from(u8::from(*self)).to_topic()
    }
}

impl TopicEncode for FixedBytes<4> {
    fn to_topic(&self) -> B256 {
        B256::right_padding_from(self.as_slice())
    }
}

impl TopicEncode for str {
    fn to_topic(&self) -> B256 {
        keccak256(self.as_bytes())
    }
}

impl TopicEncode for String {
    fn to_topic(&self) -> B256 {
        self.as_str().to_topic()
    }
}

impl TopicEncode for Bytes {
    fn to_topic(&self) -> B256 {
        keccak256(self)
    }
}

impl<T: TopicEncode + ?Sized> TopicEncode for &T {
    fn to_topic(&self) -> B256 {
        (**self).to_topic()
    }
}

/// Accepted topic values for one indexed argument. Empty matches any value.
pub type TopicRule = Vec<B256>;

/// Encode the accepted values of one indexed argument.
pub fn topic_rule<T: TopicEncode>(values: &[T]) -> TopicRule {
    values.iter().map(TopicEncode::to_topic).collect()
}

/// The topic-matching filter a log source evaluates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Contract address that must have emitted the log
    pub address: Address,
    /// Event name, for diagnostics only
    pub event: String,
    /// Accepted values per topic position. Position 0 carries the event
    /// selector unless the event is anonymous. An empty list matches any value.
    pub topics: Vec<TopicRule>,
}

impl FilterSpec {
    /// Build the filter for a raw event description.
    ///
    /// `rules` must hold exactly one entry per indexed argument, in
    /// declaration order.
    pub fn new(
        address: Address,
        event: impl Into<String>,
        selector: Option<B256>,
        indexed_inputs: usize,
        rules: Vec<TopicRule>,
    ) -> Result<Self, FilterError> {
        let event = event.into();
        if rules.len() != indexed_inputs {
            return Err(FilterError::ArgumentCount {
                event,
                expected: indexed_inputs,
                got: rules.len(),
            });
        }

        let mut topics = Vec::with_capacity(rules.len() + 1);
        if let Some(selector) = selector {
            topics.push(vec![selector]);
        }
        topics.extend(rules);
        Ok(Self {
            address,
            event,
            topics,
        })
    }

    /// Build the filter for a bound contract event.
    pub fn for_event<E: ContractEvent>(
        address: Address,
        rules: Vec<TopicRule>,
    ) -> Result<Self, FilterError> {
        Self::new(address, E::NAME, E::selector(), E::indexed_inputs(), rules)
    }

    /// Returns `true` if `log` satisfies the address and every topic position.
    /// Block range is **not** checked.
    pub fn matches(&self, log: &RawLog) -> bool {
        if log.address != self.address {
            return false;
        }
        if log.topics.len() < self.topics.len() {
            return false;
        }
        self.topics
            .iter()
            .zip(log.topics.iter())
            .all(|(accepted, actual)| accepted.is_empty() || accepted.contains(actual))
    }
}

/// Options for a historical query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOpts {
    /// First block to query (inclusive)
    pub start: u64,
    /// Last block to query (inclusive). `None` means "up to the head, then
    /// keep following live logs".
    pub end: Option<u64>,
}

impl FilterOpts {
    /// Query everything from `start` and keep following the chain.
    pub fn from_block(start: u64) -> Self {
        Self { start, end: None }
    }

    /// Query the closed range `[start, end]` only.
    pub fn range(start: u64, end: u64) -> Result<Self, FilterError> {
        if start > end {
            return Err(FilterError::InvalidRange { start, end });
        }
        Ok(Self {
            start,
            end: Some(end),
        })
    }

    /// Returns `true` if `block` falls within this range.
    pub fn contains(&self, block: u64) -> bool {
        block >= self.start && self.end.map_or(true, |end| block <= end)
    }
}

/// Options for a live subscription.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchOpts {
    /// Start delivering from this block; `None` means from the current head.
    pub start: Option<u64>,
}
