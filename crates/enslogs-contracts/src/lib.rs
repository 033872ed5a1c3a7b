//! # enslogs-contracts
//!
//! Typed event bindings for the contracts behind ENS usernames:
//!
//! | Contract            | Events                                                    |
//! |---------------------|-----------------------------------------------------------|
//! | `EnsRegistry`       | `NewOwner`, `Transfer`, `NewResolver`, `NewTTL`           |
//! | `PublicResolver`    | `AddrChanged`, `ContentChanged`, `MultihashChanged`, `NameChanged`, `ABIChanged`, `PubkeyChanged`, `TextChanged` |
//! | `UsernameRegistrar` | `RegistryState`, `RegistryPrice`, `RegistryMoved`, `UsernameOwner` |
//! | `Erc20Token`        | `Transfer`, `Approval`                                    |
//!
//! Every event is a Rust type implementing
//! [`ContractEvent`](enslogs_core::ContractEvent). Each contract wrapper only
//! filters and watches its own events.

#[macro_use]
mod macros;

pub mod registrar;
pub mod registry;
pub mod resolver;
pub mod token;

pub use registrar::UsernameRegistrar;
pub use registry::EnsRegistry;
pub use resolver::PublicResolver;
pub use token::Erc20Token;

mod sealed {
    pub trait Sealed {}
}

#[doc(hidden)]
pub mod __private {
    pub use alloy_primitives::{Address, B256};
    pub use enslogs_core::{
        error::DecodeError,
        event::ContractEvent,
        filter::{topic_rule, TopicRule},
        log::RawLog,
    };
    pub use enslogs_evm::{EventDescriptor, EventParam, FieldReader, ParamKind, ResolvedEvent, ToSolValue};
}
