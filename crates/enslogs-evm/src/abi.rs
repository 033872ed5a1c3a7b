//! Static event descriptions.
//!
//! An [`EventDescriptor`] is the compile-time description of a Solidity event:
//! its name, its parameters in declaration order, and whether it is anonymous.
//! Bound contracts declare their descriptors as `static` items; descriptors
//! for ABIs only known at runtime come from [`EventDescriptor::from_json_abi`].

use alloy_core::dyn_abi::DynSolType;
use alloy_dyn_abi::Specifier;
use alloy_primitives::B256;
use enslogs_core::error::DecodeError;
use std::borrow::Cow;
use std::fmt;

use crate::fingerprint;

/// The Solidity parameter types an event binding may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Address,
    Bool,
    /// Unsigned integer, width in bits
    Uint(u16),
    /// Signed integer, width in bits
    Int(u16),
    /// Fixed-size byte array, length in bytes
    FixedBytes(u8),
    /// Variable-length byte array
    Bytes,
    /// UTF-8 string
    String,
}

impl ParamKind {
    /// Build the alloy `DynSolType` for this kind.
    pub fn to_dyn(self) -> DynSolType {
        match self {
            ParamKind::Address => DynSolType::Address,
            ParamKind::Bool => DynSolType::Bool,
            ParamKind::Uint(bits) => DynSolType::Uint(bits as usize),
            ParamKind::Int(bits) => DynSolType::Int(bits as usize),
            ParamKind::FixedBytes(n) => DynSolType::FixedBytes(n as usize),
            ParamKind::Bytes => DynSolType::Bytes,
            ParamKind::String => DynSolType::String,
        }
    }

    /// Map an alloy `DynSolType` back onto a supported kind.
    pub fn from_dyn(ty: &DynSolType) -> Result<Self, DecodeError> {
        match ty {
            DynSolType::Address => Ok(ParamKind::Address),
            DynSolType::Bool => Ok(ParamKind::Bool),
            DynSolType::Uint(bits) => Ok(ParamKind::Uint(*bits as u16)),
            DynSolType::Int(bits) => Ok(ParamKind::Int(*bits as u16)),
            DynSolType::FixedBytes(n) => Ok(ParamKind::FixedBytes(*n as u8)),
            DynSolType::Bytes => Ok(ParamKind::Bytes),
            DynSolType::String => Ok(ParamKind::String),
            other => Err(DecodeError::UnsupportedType {
                ty: other.sol_type_name().into_owned(),
            }),
        }
    }

    /// Reference types are stored as their keccak256 hash when indexed;
    /// the original value is unrecoverable from the topic.
    pub fn is_hashed_when_indexed(self) -> bool {
        matches!(self, ParamKind::Bytes | ParamKind::String)
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Address => write!(f, "address"),
            ParamKind::Bool => write!(f, "bool"),
            ParamKind::Uint(bits) => write!(f, "uint{bits}"),
            ParamKind::Int(bits) => write!(f, "int{bits}"),
            ParamKind::FixedBytes(n) => write!(f, "bytes{n}"),
            ParamKind::Bytes => write!(f, "bytes"),
            ParamKind::String => write!(f, "string"),
        }
    }
}

/// A single event parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventParam {
    pub name: Cow<'static, str>,
    pub kind: ParamKind,
    /// Is this parameter carried in a topic rather than the data payload?
    pub indexed: bool,
}

impl EventParam {
    /// An indexed parameter (carried in a topic).
    pub const fn indexed(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name: Cow::Borrowed(name),
            kind,
            indexed: true,
        }
    }

    /// A non-indexed parameter (carried in the data payload).
    pub const fn data(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name: Cow::Borrowed(name),
            kind,
            indexed: false,
        }
    }
}

/// Description of a Solidity event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDescriptor {
    pub name: Cow<'static, str>,
    /// Parameters in declaration order (order matters for ABI decode)
    pub params: Cow<'static, [EventParam]>,
    pub anonymous: bool,
}

impl EventDescriptor {
    /// Describe a non-anonymous event.
    pub const fn new(name: &'static str, params: &'static [EventParam]) -> Self {
        Self {
            name: Cow::Borrowed(name),
            params: Cow::Borrowed(params),
            anonymous: false,
        }
    }

    /// Build a descriptor from a parsed JSON ABI event.
    pub fn from_json_abi(event: &alloy_json_abi::Event) -> Result<Self, DecodeError> {
        let params = event
            .inputs
            .iter()
            .map(|input| {
                let ty = input.resolve().map_err(|e| DecodeError::AbiDecodeFailed {
                    reason: format!("param '{}': {e}", input.name),
                })?;
                Ok(EventParam {
                    name: Cow::Owned(input.name.clone()),
                    kind: ParamKind::from_dyn(&ty)?,
                    indexed: input.indexed,
                })
            })
            .collect::<Result<Vec<_>, DecodeError>>()?;

        Ok(Self {
            name: Cow::Owned(event.name.clone()),
            params: Cow::Owned(params),
            anonymous: event.anonymous,
        })
    }

    /// The canonical signature, e.g. `"NewOwner(bytes32,bytes32,address)"`.
    pub fn signature(&self) -> String {
        let kinds: Vec<String> = self.params.iter().map(|p| p.kind.to_string()).collect();
        format!("{}({})", self.name, kinds.join(","))
    }

    /// keccak256 of the canonical signature.
    pub fn selector(&self) -> B256 {
        fingerprint::keccak256_signature(&self.signature())
    }

    /// Returns only the indexed parameters (EVM topics[1..]).
    pub fn indexed_params(&self) -> impl Iterator<Item = &EventParam> {
        self.params.iter().filter(|p| p.indexed)
    }

    /// Number of indexed parameters.
    pub fn indexed_count(&self) -> usize {
        self.indexed_params().count()
    }
}
