//! # enslogs-stream
//!
//! Event iteration and watching for bound contracts.
//!
//! ## Architecture
//! ```text
//! BoundFilterer (contract address + LogSource)
//!       │
//!       ├── filter_logs ──▶ LogIterator   (pull: history, then live)
//!       │
//!       └── watch_logs  ──▶ watcher task  (push: live → mpsc sink)
//!                               │
//!                               ▼
//!                     ContractEvent::decode_log
//! ```

pub mod config;
pub mod filterer;
pub mod iterator;
pub mod watcher;

pub use config::{ConfigError, StreamConfig};
pub use filterer::BoundFilterer;
pub use iterator::LogIterator;
pub use watcher::{watch, WatchHandle};
