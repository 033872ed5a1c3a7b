//! # enslogs-evm
//!
//! EVM ABI layer for enslogs: static event descriptors, selector computation,
//! and raw log decoding/encoding via alloy.

pub mod abi;
pub mod decoder;
pub mod fingerprint;
pub mod value;

pub use abi::{EventDescriptor, EventParam, ParamKind};
pub use decoder::ResolvedEvent;
pub use value::{FieldReader, FromSolValue, ToSolValue};

// Re-exported so event bindings only need this crate for ABI values.
pub use alloy_core::dyn_abi::DynSolValue;
