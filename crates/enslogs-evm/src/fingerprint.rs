//! EVM event selector computation.
//!
//! The selector of a non-anonymous EVM event is the keccak256 hash of its
//! canonical signature string, e.g.:
//!   keccak256("NewOwner(bytes32,bytes32,address)")
//!   → 0xce0457fe73731f824cc272376169235128c118b49d344817417c6d108d155e82
//!
//! For raw logs, topics[0] IS the selector and is never recomputed.

use alloy_primitives::{keccak256, B256};

/// Compute the keccak256 selector of an event signature string.
/// Input: `"EventName(type1,type2,...)"`, the canonical ABI signature.
pub fn keccak256_signature(signature: &str) -> B256 {
    keccak256(signature.as_bytes())
}

/// Extract the selector from a raw log's topics (topics[0]).
pub fn from_topics(topics: &[B256]) -> Option<B256> {
    topics.first().copied()
}
