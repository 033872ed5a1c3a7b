//! Conversions between typed event fields and `DynSolValue`s.

use alloy_core::dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes, FixedBytes, B256, U256};
use enslogs_core::error::DecodeError;

use crate::abi::ParamKind;
use crate::decoder::type_mismatch;

/// A Rust type an event field can be converted into.
pub trait FromSolValue: Sized {
    /// Convert `value`; `field` names the parameter in error messages.
    fn from_sol_value(field: &str, value: DynSolValue) -> Result<Self, DecodeError>;
}

impl FromSolValue for B256 {
    fn from_sol_value(field: &str, value: DynSolValue) -> Result<Self, DecodeError> {
        match value {
            DynSolValue::FixedBytes(word, 32) => Ok(word),
            other => Err(type_mismatch(field, "bytes32", &other)),
        }
    }
}

impl FromSolValue for FixedBytes<4> {
    fn from_sol_value(field: &str, value: DynSolValue) -> Result<Self, DecodeError> {
        match value {
            DynSolValue::FixedBytes(word, 4) => Ok(FixedBytes::from_slice(&word[..4])),
            other => Err(type_mismatch(field, "bytes4", &other)),
        }
    }
}

impl FromSolValue for Address {
    fn from_sol_value(field: &str, value: DynSolValue) -> Result<Self, DecodeError> {
        match value {
            DynSolValue::Address(addr) => Ok(addr),
            other => Err(type_mismatch(field, "address", &other)),
        }
    }
}

impl FromSolValue for U256 {
    fn from_sol_value(field: &str, value: DynSolValue) -> Result<Self, DecodeError> {
        match value {
            DynSolValue::Uint(v, _) => Ok(v),
            other => Err(type_mismatch(field, "uint", &other)),
        }
    }
}

macro_rules! impl_from_sol_uint {
    ($($ty:ty => $name:literal),* $(,)?) => {$(
        impl FromSolValue for $ty {
            fn from_sol_value(field: &str, value: DynSolValue) -> Result<Self, DecodeError> {
                match value {
                    DynSolValue::Uint(v, _) => <$ty>::try_from(v).map_err(|_| {
                        DecodeError::AbiDecodeFailed {
                            reason: format!("field '{field}': {v} overflows {}", $name),
                        }
                    }),
                    other => Err(type_mismatch(field, $name, &other)),
                }
            }
        }
    )*};
}

impl_from_sol_uint! {
    u64 => "uint64",
    u16 => "uint16",
    u8  => "uint8",
}

impl FromSolValue for bool {
    fn from_sol_value(field: &str, value: DynSolValue) -> Result<Self, DecodeError> {
        match value {
            DynSolValue::Bool(b) => Ok(b),
            other => Err(type_mismatch(field, "bool", &other)),
        }
    }
}

impl FromSolValue for String {
    fn from_sol_value(field: &str, value: DynSolValue) -> Result<Self, DecodeError> {
        match value {
            DynSolValue::String(s) => Ok(s),
            other => Err(type_mismatch(field, "string", &other)),
        }
    }
}

impl FromSolValue for Bytes {
    fn from_sol_value(field: &str, value: DynSolValue) -> Result<Self, DecodeError> {
        match value {
            DynSolValue::Bytes(b) => Ok(Bytes::from(b)),
            other => Err(type_mismatch(field, "bytes", &other)),
        }
    }
}

/// A Rust field type that can be encoded as a parameter of the given kind.
pub trait ToSolValue {
    fn to_sol_value(&self, kind: ParamKind) -> DynSolValue;
}

fn uint_bits(kind: ParamKind) -> usize {
    match kind {
        ParamKind::Uint(bits) => bits as usize,
        _ => 256,
    }
}

impl ToSolValue for B256 {
    fn to_sol_value(&self, kind: ParamKind) -> DynSolValue {
        match kind {
            ParamKind::FixedBytes(n) => DynSolValue::FixedBytes(*self, n as usize),
            _ => DynSolValue::FixedBytes(*self, 32),
        }
    }
}

impl ToSolValue for FixedBytes<4> {
    fn to_sol_value(&self, _kind: ParamKind) -> DynSolValue {
        DynSolValue::FixedBytes(B256::right_padding_from(self.as_slice()), 4)
    }
}

impl ToSolValue for Address {
    fn to_sol_value(&self, _kind: ParamKind) -> DynSolValue {
        DynSolValue::Address(*self)
    }
}

impl ToSolValue for U256 {
    fn to_sol_value(&self, kind: ParamKind) -> DynSolValue {
        DynSolValue::Uint(*self, uint_bits(kind))
    }
}

macro_rules! impl_to_sol_uint {
    ($($ty:ty),*) => {$(
        impl ToSolValue for $ty {
            fn to_sol_value(&self, kind: ParamKind) -> DynSolValue {
                DynSolValue::Uint(U256::from(*self), uint_bits(kind))
            }
        }
    )*};
}

impl_to_sol_uint!(u64, u16, u8);

impl ToSolValue for bool {
    fn to_sol_value(&self, _kind: ParamKind) -> DynSolValue {
        DynSolValue::Bool(*self)
    }
}

impl ToSolValue for String {
    fn to_sol_value(&self, _kind: ParamKind) -> DynSolValue {
        DynSolValue::String(self.clone())
    }
}

impl ToSolValue for Bytes {
    fn to_sol_value(&self, _kind: ParamKind) -> DynSolValue {
        DynSolValue::Bytes(self.to_vec())
    }
}

/// Hands out decoded values one field at a time, in declaration order.
#[derive(Debug)]
pub struct FieldReader {
    values: std::vec::IntoIter<DynSolValue>,
}

impl FieldReader {
    pub fn new(values: Vec<DynSolValue>) -> Self {
        Self {
            values: values.into_iter(),
        }
    }

    /// Convert the next value into `T`.
    pub fn next<T: FromSolValue>(&mut self, field: &str) -> Result<T, DecodeError> {
        let value = self.values.next().ok_or_else(|| DecodeError::MissingField {
            field: field.to_string(),
        })?;
        T::from_sol_value(field, value)
    }
}
