//! # enslogs-core
//!
//! Core types shared by every enslogs crate: raw logs, topic filters, the
//! `LogSource` abstraction over node connections, live subscription handles,
//! the `ContractEvent` trait and the error taxonomy.

pub mod error;
pub mod event;
pub mod filter;
pub mod log;
pub mod memory;
pub mod source;

pub use error::{DecodeError, FilterError, SourceError, StreamError};
pub use event::{ContractEvent, EventLog};
pub use filter::{topic_rule, FilterOpts, FilterSpec, TopicEncode, TopicRule, WatchOpts};
pub use log::RawLog;
pub use memory::MemoryLogSource;
pub use source::{subscription, LiveLogs, LogSource, Subscription, SubscriptionFeed};
