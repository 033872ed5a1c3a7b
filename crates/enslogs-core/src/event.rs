//! The `ContractEvent` trait and the decoded event envelope.
//!
//! Every bound contract event is a Rust type implementing `ContractEvent`.
//! The event's identity (name, selector, indexed-argument count) is fixed at
//! compile time, so iterators and watchers never dispatch on event names at
//! runtime.

use crate::error::DecodeError;
use crate::log::RawLog;
use alloy_primitives::B256;

/// A typed contract event that can be decoded from a raw log.
pub trait ContractEvent: Sized + Send + 'static {
    /// The Solidity event name, e.g. `"NewOwner"`.
    const NAME: &'static str;

    /// keccak256 of the canonical event signature; `None` for anonymous events.
    fn selector() -> Option<B256>;

    /// Number of indexed arguments, i.e. topics after the selector.
    fn indexed_inputs() -> usize;

    /// Decode a raw log into this event.
    fn decode_log(log: &RawLog) -> Result<Self, DecodeError>;
}

/// A decoded event together with the raw log it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLog<E> {
    /// The decoded event
    pub event: E,
    /// The originating log, kept for provenance
    pub raw: RawLog,
}

impl<E: ContractEvent> EventLog<E> {
    /// Decode `raw` into an envelope carrying both the event and the log.
    pub fn decode(raw: RawLog) -> Result<Self, DecodeError> {
        let event = E::decode_log(&raw)?;
        Ok(Self { event, raw })
    }
}

impl<E> EventLog<E> {
    /// Block number the event was emitted in.
    pub fn block_number(&self) -> u64 {
        self.raw.block_number
    }

    /// Consume the envelope, keeping only the event.
    pub fn into_event(self) -> E {
        self.event
    }
}
