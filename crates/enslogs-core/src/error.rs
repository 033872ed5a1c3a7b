//! Error types for the log filtering and watching pipeline.

use thiserror::Error;

/// Errors reported by a [`LogSource`](crate::source::LogSource) or by a live
/// subscription it handed out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("RPC connection failed: {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Log query failed: {reason}")]
    QueryFailed { reason: String },

    #[error("Subscription failed: {reason}")]
    SubscriptionFailed { reason: String },

    #[error("Subscription closed unexpectedly")]
    Closed,

    #[error("Subscriber lagged: live buffer of {capacity} logs is full")]
    Lagged { capacity: usize },

    #[error("{0}")]
    Other(String),
}

/// Errors that can occur while decoding a single log into a typed event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Log has no event signature topic")]
    MissingSignature,

    #[error("Event signature mismatch for {event}: expected {expected}, got {got}")]
    SignatureMismatch {
        event: String,
        expected: String,
        got: String,
    },

    #[error("Topic count mismatch for {event}: expected {expected}, got {got}")]
    TopicCount {
        event: String,
        expected: usize,
        got: usize,
    },

    #[error("ABI decode failed: {reason}")]
    AbiDecodeFailed { reason: String },

    #[error("Type mismatch for field '{field}': expected {expected}, got {got}")]
    TypeMismatch {
        field: String,
        expected: String,
        got: String,
    },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Unsupported ABI type: {ty}")]
    UnsupportedType { ty: String },

    #[error("{0}")]
    Other(String),
}

/// Precondition violations caught while building a filter, before any I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Argument count mismatch for {event}: event has {expected} indexed arguments, got {got}")]
    ArgumentCount {
        event: String,
        expected: usize,
        got: usize,
    },

    #[error("Invalid block range: start {start} is after end {end}")]
    InvalidRange { start: u64, end: u64 },
}

/// Errors surfaced by log iterators and watchers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    #[error("Transport error: {0}")]
    Source(#[from] SourceError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Invalid filter: {0}")]
    Filter(#[from] FilterError),

    #[error("Watcher task aborted: {reason}")]
    TaskAborted { reason: String },
}

impl StreamError {
    /// Returns `true` if the error came from decoding a log.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// Returns `true` if the error came from the log source.
    pub fn is_source(&self) -> bool {
        matches!(self, Self::Source(_))
    }
}
