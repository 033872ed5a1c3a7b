//! Public resolver events.
//!
//! `TextChanged.indexedKey` is declared non-indexed by the deployed resolver,
//! so both key fields carry the full string.

use alloy_primitives::{Address, Bytes, B256, U256};

/// Event ABI of the public resolver.
pub const ABI: &str = r#"[
  {"anonymous":false,"type":"event","name":"AddrChanged","inputs":[
    {"indexed":true,"name":"node","type":"bytes32"},
    {"indexed":false,"name":"a","type":"address"}]},
  {"anonymous":false,"type":"event","name":"ContentChanged","inputs":[
    {"indexed":true,"name":"node","type":"bytes32"},
    {"indexed":false,"name":"hash","type":"bytes32"}]},
  {"anonymous":false,"type":"event","name":"NameChanged","inputs":[
    {"indexed":true,"name":"node","type":"bytes32"},
    {"indexed":false,"name":"name","type":"string"}]},
  {"anonymous":false,"type":"event","name":"ABIChanged","inputs":[
    {"indexed":true,"name":"node","type":"bytes32"},
    {"indexed":true,"name":"contentType","type":"uint256"}]},
  {"anonymous":false,"type":"event","name":"PubkeyChanged","inputs":[
    {"indexed":true,"name":"node","type":"bytes32"},
    {"indexed":false,"name":"x","type":"bytes32"},
    {"indexed":false,"name":"y","type":"bytes32"}]},
  {"anonymous":false,"type":"event","name":"TextChanged","inputs":[
    {"indexed":true,"name":"node","type":"bytes32"},
    {"indexed":false,"name":"indexedKey","type":"string"},
    {"indexed":false,"name":"key","type":"string"}]},
  {"anonymous":false,"type":"event","name":"MultihashChanged","inputs":[
    {"indexed":true,"name":"node","type":"bytes32"},
    {"indexed":false,"name":"hash","type":"bytes"}]}
]"#;

contract_event! {
    /// Logged when the address record of a node changes.
    pub struct AddrChanged {
        indexed {
            node("node"): B256 = FixedBytes(32),
        }
        data {
            a("a"): Address = Address,
        }
    }
}

contract_event! {
    /// Logged when the content hash of a node changes.
    pub struct ContentChanged {
        indexed {
            node("node"): B256 = FixedBytes(32),
        }
        data {
            hash("hash"): B256 = FixedBytes(32),
        }
    }
}

contract_event! {
    pub struct NameChanged {
        indexed {
            node("node"): B256 = FixedBytes(32),
        }
        data {
            name("name"): String = String,
        }
    }
}

contract_event! {
    /// Logged when an ABI of the given content type is set for a node.
    pub struct ABIChanged {
        indexed {
            node("node"): B256 = FixedBytes(32),
            content_type("contentType"): U256 = Uint(256),
        }
        data {}
    }
}

contract_event! {
    /// Logged when the SECP256k1 public key of a node changes.
    pub struct PubkeyChanged {
        indexed {
            node("node"): B256 = FixedBytes(32),
        }
        data {
            x("x"): B256 = FixedBytes(32),
            y("y"): B256 = FixedBytes(32),
        }
    }
}

contract_event! {
    /// Logged when a text record of a node changes.
    pub struct TextChanged {
        indexed {
            node("node"): B256 = FixedBytes(32),
        }
        data {
            indexed_key("indexedKey"): String = String,
            key("key"): String = String,
        }
    }
}

contract_event! {
    /// Logged when the multihash record of a node changes.
    pub struct MultihashChanged {
        indexed {
            node("node"): B256 = FixedBytes(32),
        }
        data {
            hash("hash"): Bytes = Bytes,
        }
    }
}

bound_contract! {
    /// The public resolver bound to a deployed address.
    pub struct PublicResolver: ResolverEvent, abi = ABI, {
        AddrChanged,
        ContentChanged,
        NameChanged,
        ABIChanged,
        PubkeyChanged,
        TextChanged,
        MultihashChanged,
    }
}
