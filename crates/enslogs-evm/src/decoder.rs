//! `ResolvedEvent`: an event descriptor resolved once into alloy types,
//! able to decode raw logs and to encode synthetic ones.
//!
//! ## Decoding rules
//! - Non-anonymous events require `topics[0]` to equal the selector.
//! - The remaining topics must match the indexed parameters one to one.
//! - Indexed value types are ABI-decoded from their 32-byte topic.
//! - Indexed reference types (`string`, `bytes`) are stored as the keccak256
//!   of their contents. The original value is **unrecoverable**, so the raw
//!   32-byte hash is returned as `bytes32`.
//! - Non-indexed parameters are decoded from the data payload as an ABI
//!   parameter tuple.

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{keccak256, Address, B256};
use enslogs_core::{error::DecodeError, log::RawLog};

use crate::abi::{EventDescriptor, ParamKind};

/// An event descriptor with its selector and alloy types computed up front.
#[derive(Debug, Clone)]
pub struct ResolvedEvent {
    descriptor: EventDescriptor,
    selector: B256,
    /// Declaration position and kind of each indexed parameter
    indexed: Vec<(usize, ParamKind)>,
    /// Declaration position of each non-indexed parameter
    body_positions: Vec<usize>,
    /// Tuple of the non-indexed parameter types
    body_type: DynSolType,
}

impl ResolvedEvent {
    pub fn new(descriptor: EventDescriptor) -> Self {
        let selector = descriptor.selector();
        let mut indexed = Vec::new();
        let mut body_positions = Vec::new();
        let mut body_types = Vec::new();
        for (pos, param) in descriptor.params.iter().enumerate() {
            if param.indexed {
                indexed.push((pos, param.kind));
            } else {
                body_positions.push(pos);
                body_types.push(param.kind.to_dyn());
            }
        }
        Self {
            descriptor,
            selector,
            indexed,
            body_positions,
            body_type: DynSolType::Tuple(body_types),
        }
    }

    pub fn descriptor(&self) -> &EventDescriptor {
        &self.descriptor
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// The selector carried in topics[0]; `None` for anonymous events.
    pub fn selector(&self) -> Option<B256> {
        (!self.descriptor.anonymous).then_some(self.selector)
    }

    /// Number of indexed parameters.
    pub fn indexed_count(&self) -> usize {
        self.indexed.len()
    }

    /// Decode a raw log into its parameter values, in declaration order.
    pub fn decode(&self, log: &RawLog) -> Result<Vec<DynSolValue>, DecodeError> {
        let topics = if self.descriptor.anonymous {
            &log.topics[..]
        } else {
            let (first, rest) = log
                .topics
                .split_first()
                .ok_or(DecodeError::MissingSignature)?;
            if *first != self.selector {
                return Err(DecodeError::SignatureMismatch {
                    event: self.name().to_string(),
                    expected: self.selector.to_string(),
                    got: first.to_string(),
                });
            }
            rest
        };

        if topics.len() != self.indexed.len() {
            return Err(DecodeError::TopicCount {
                event: self.name().to_string(),
                expected: self.indexed.len(),
                got: topics.len(),
            });
        }

        let mut slots: Vec<Option<DynSolValue>> = vec![None; self.descriptor.params.len()];

        // Indexed fields → topics
        for ((pos, kind), topic) in self.indexed.iter().zip(topics) {
            slots[*pos] = Some(decode_topic(topic, *kind)?);
        }

        // Non-indexed fields → data payload
        if !self.body_positions.is_empty() {
            let decoded = self
                .body_type
                .abi_decode_params(&log.data)
                .map_err(|e| DecodeError::AbiDecodeFailed {
                    reason: format!("{}: {e}", self.name()),
                })?;
            let values = match decoded {
                DynSolValue::Tuple(vals) => vals,
                other => vec![other],
            };
            if values.len() != self.body_positions.len() {
                return Err(DecodeError::AbiDecodeFailed {
                    reason: format!(
                        "{}: expected {} data values, got {}",
                        self.name(),
                        self.body_positions.len(),
                        values.len()
                    ),
                });
            }
            for (pos, val) in self.body_positions.iter().zip(values) {
                slots[*pos] = Some(val);
            }
        }

        slots
            .into_iter()
            .zip(self.descriptor.params.iter())
            .map(|(slot, param)| {
                slot.ok_or_else(|| DecodeError::MissingField {
                    field: param.name.to_string(),
                })
            })
            .collect()
    }

    /// Encode parameter values (declaration order) into a raw log emitted by
    /// `address`. The inverse of [`decode`](Self::decode), except that indexed
    /// reference types only survive as their hash.
    pub fn encode(&self, address: Address, values: &[DynSolValue]) -> Result<RawLog, DecodeError> {
        let params = &self.descriptor.params;
        if values.len() != params.len() {
            return Err(DecodeError::AbiDecodeFailed {
                reason: format!(
                    "argument count mismatch: {} has {}, got {}",
                    self.name(),
                    params.len(),
                    values.len()
                ),
            });
        }

        let mut topics = Vec::with_capacity(self.indexed.len() + 1);
        if !self.descriptor.anonymous {
            topics.push(self.selector);
        }
        let mut body = Vec::with_capacity(self.body_positions.len());

        for (param, value) in params.iter().zip(values) {
            if param.indexed {
                topics.push(encode_topic(&param.name, param.kind, value)?);
            } else {
                if !param.kind.to_dyn().matches(value) {
                    return Err(type_mismatch(&param.name, param.kind, value));
                }
                body.push(value.clone());
            }
        }

        let data = if body.is_empty() {
            Vec::new()
        } else {
            DynSolValue::Tuple(body).abi_encode_params()
        };
        Ok(RawLog::new(address, topics, data))
    }
}

fn decode_topic(topic: &B256, kind: ParamKind) -> Result<DynSolValue, DecodeError> {
    if kind.is_hashed_when_indexed() {
        return Ok(DynSolValue::FixedBytes(*topic, 32));
    }
    kind.to_dyn()
        .abi_decode(topic.as_slice())
        .map_err(|e| DecodeError::AbiDecodeFailed {
            reason: format!("topic decode: {e}"),
        })
}

fn encode_topic(name: &str, kind: ParamKind, value: &DynSolValue) -> Result<B256, DecodeError> {
    if kind.is_hashed_when_indexed() {
        return match value {
            DynSolValue::String(s) => Ok(keccak256(s.as_bytes())),
            DynSolValue::Bytes(b) => Ok(keccak256(b)),
            // Already hashed
            DynSolValue::FixedBytes(word, 32) => Ok(*word),
            other => Err(type_mismatch(name, kind, other)),
        };
    }
    if !kind.to_dyn().matches(value) {
        return Err(type_mismatch(name, kind, value));
    }
    value.as_word().ok_or_else(|| type_mismatch(name, kind, value))
}

pub(crate) fn type_mismatch(field: &str, expected: impl ToString, got: &DynSolValue) -> DecodeError {
    DecodeError::TypeMismatch {
        field: field.to_string(),
        expected: expected.to_string(),
        got: got
            .as_type()
            .map(|t| t.sol_type_name().into_owned())
            .unwrap_or_else(|| "unknown".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::EventParam;
    use alloy_primitives::{address, b256, U256};

    static NEW_OWNER_PARAMS: [EventParam; 3] = [
        EventParam::indexed("node", ParamKind::FixedBytes(32)),
        EventParam::indexed("label", ParamKind::FixedBytes(32)),
        EventParam::data("owner", ParamKind::Address),
    ];
    static NEW_OWNER: EventDescriptor = EventDescriptor::new("NewOwner", &NEW_OWNER_PARAMS);

    static TEXT_CHANGED_PARAMS: [EventParam; 3] = [
        EventParam::indexed("node", ParamKind::FixedBytes(32)),
        EventParam::indexed("indexedKey", ParamKind::String),
        EventParam::data("key", ParamKind::String),
    ];
    static TEXT_CHANGED: EventDescriptor =
        EventDescriptor::new("TextChanged", &TEXT_CHANGED_PARAMS);

    const REGISTRY: Address = address!("00000000000c2e074ec69a0dfb2997ba6c7d2e1e");

    fn new_owner_log() -> RawLog {
        // A NewOwner log as emitted by the ENS registry
        let mut data = vec![0u8; 32];
        data[12..].copy_from_slice(
            &hex::decode("d8da6bf26964af9d7eed9e03e53415d37aa96045").unwrap(),
        );
        RawLog::new(
            REGISTRY,
            vec![
                b256!("ce0457fe73731f824cc272376169235128c118b49d344817417c6d108d155e82"),
                // namehash("eth")
                b256!("93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae"),
                // keccak256("vitalik")
                b256!("af2caa1c2ca1d027f1ac823b529d0a67cd144264b2789fa2ea4d63a67c7103cc"),
            ],
            data,
        )
    }

    #[test]
    fn decodes_indexed_and_data_in_declaration_order() {
        let resolved = ResolvedEvent::new(NEW_OWNER.clone());
        let values = resolved.decode(&new_owner_log()).unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(
            values[0],
            DynSolValue::FixedBytes(
                b256!("93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae"),
                32
            )
        );
        assert_eq!(
            values[2],
            DynSolValue::Address(address!("d8da6bf26964af9d7eed9e03e53415d37aa96045"))
        );
    }

    #[test]
    fn rejects_wrong_selector() {
        let resolved = ResolvedEvent::new(NEW_OWNER.clone());
        let mut log = new_owner_log();
        log.topics[0] = B256::ZERO;
        assert!(matches!(
            resolved.decode(&log),
            Err(DecodeError::SignatureMismatch { .. })
        ));
        log.topics.clear();
        assert_eq!(resolved.decode(&log), Err(DecodeError::MissingSignature));
    }

    #[test]
    fn rejects_wrong_topic_count() {
        let resolved = ResolvedEvent::new(NEW_OWNER.clone());
        let mut log = new_owner_log();
        log.topics.pop();
        assert_eq!(
            resolved.decode(&log),
            Err(DecodeError::TopicCount {
                event: "NewOwner".into(),
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn rejects_truncated_data() {
        let resolved = ResolvedEvent::new(NEW_OWNER.clone());
        let mut log = new_owner_log();
        log.data = vec![0u8; 7].into();
        assert!(matches!(
            resolved.decode(&log),
            Err(DecodeError::AbiDecodeFailed { .. })
        ));
    }

    #[test]
    fn indexed_string_decodes_to_hash() {
        let resolved = ResolvedEvent::new(TEXT_CHANGED.clone());
        let node = B256::repeat_byte(0x42);
        let log = resolved
            .encode(
                REGISTRY,
                &[
                    DynSolValue::FixedBytes(node, 32),
                    DynSolValue::String("avatar".into()),
                    DynSolValue::String("avatar".into()),
                ],
            )
            .unwrap();
        assert_eq!(log.topics[2], keccak256("avatar"));

        let values = resolved.decode(&log).unwrap();
        assert_eq!(values[1], DynSolValue::FixedBytes(keccak256("avatar"), 32));
        assert_eq!(values[2], DynSolValue::String("avatar".into()));
    }

    #[test]
    fn encode_matches_real_log() {
        let resolved = ResolvedEvent::new(NEW_OWNER.clone());
        let real = new_owner_log();
        let encoded = resolved
            .encode(
                REGISTRY,
                &[
                    DynSolValue::FixedBytes(real.topics[1], 32),
                    DynSolValue::FixedBytes(real.topics[2], 32),
                    DynSolValue::Address(address!("d8da6bf26964af9d7eed9e03e53415d37aa96045")),
                ],
            )
            .unwrap();
        assert_eq!(encoded.topics, real.topics);
        assert_eq!(encoded.data, real.data);
    }

    #[test]
    fn encode_rejects_mismatched_types() {
        let resolved = ResolvedEvent::new(NEW_OWNER.clone());
        let err = resolved
            .encode(
                REGISTRY,
                &[
                    DynSolValue::FixedBytes(B256::ZERO, 32),
                    DynSolValue::FixedBytes(B256::ZERO, 32),
                    DynSolValue::Uint(U256::from(1), 256),
                ],
            )
            .unwrap_err();
        assert!(matches!(err, DecodeError::TypeMismatch { field, .. } if field == "owner"));
    }
}
