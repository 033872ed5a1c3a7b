//! A minimal hand-decoded event shared by the integration tests.

#![allow(dead_code)]

use alloy_primitives::{address, keccak256, Address, Bytes, B256, U256};
use enslogs_core::{
    error::DecodeError,
    event::ContractEvent,
    filter::{FilterSpec, TopicRule},
    log::RawLog,
    source::{LiveLogs, SubscriptionFeed},
};

pub const CONTRACT: Address = address!("00000000000c2e074ec69a0dfb2997ba6c7d2e1e");

/// `event Ping(address indexed from, uint64 seq)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ping {
    pub from: Address,
    pub seq: u64,
}

impl ContractEvent for Ping {
    const NAME: &'static str = "Ping";

    fn selector() -> Option<B256> {
        Some(keccak256("Ping(address,uint64)"))
    }

    fn indexed_inputs() -> usize {
        1
    }

    fn decode_log(log: &RawLog) -> Result<Self, DecodeError> {
        let selector = log.topics.first().ok_or(DecodeError::MissingSignature)?;
        if Some(*selector) != Self::selector() {
            return Err(DecodeError::SignatureMismatch {
                event: Self::NAME.into(),
                expected: keccak256("Ping(address,uint64)").to_string(),
                got: selector.to_string(),
            });
        }
        if log.topics.len() != 2 {
            return Err(DecodeError::TopicCount {
                event: Self::NAME.into(),
                expected: 1,
                got: log.topics.len() - 1,
            });
        }
        if log.data.len() != 32 {
            return Err(DecodeError::AbiDecodeFailed {
                reason: format!("expected 32 data bytes, got {}", log.data.len()),
            });
        }
        let seq = u64::try_from(U256::from_be_slice(&log.data))
            .map_err(|e| DecodeError::AbiDecodeFailed { reason: e.to_string() })?;
        Ok(Self {
            from: Address::from_word(log.topics[1]),
            seq,
        })
    }
}

pub fn alice() -> Address {
    Address::repeat_byte(0xa1)
}

pub fn bob() -> Address {
    Address::repeat_byte(0xb0)
}

/// A well-formed Ping log emitted at block `seq`.
pub fn ping_from(from: Address, seq: u64) -> RawLog {
    let selector = keccak256("Ping(address,uint64)");
    let data = U256::from(seq).to_be_bytes::<32>().to_vec();
    RawLog::new(CONTRACT, vec![selector, from.into_word()], data).at_block(seq)
}

pub fn ping(seq: u64) -> RawLog {
    ping_from(alice(), seq)
}

/// A Ping log with a truncated data payload.
pub fn malformed(block: u64) -> RawLog {
    let mut log = ping(block);
    log.data = Bytes::from_static(&[0xde, 0xad, 0xbe]);
    log
}

pub fn any_ping() -> FilterSpec {
    ping_filter(vec![vec![]])
}

pub fn ping_filter(rules: Vec<TopicRule>) -> FilterSpec {
    FilterSpec::for_event::<Ping>(CONTRACT, rules).unwrap()
}

/// A live subscription pair with the transport half kept by the test.
pub fn live_pair(capacity: usize) -> (LiveLogs, SubscriptionFeed) {
    enslogs_core::source::subscription(capacity)
}
