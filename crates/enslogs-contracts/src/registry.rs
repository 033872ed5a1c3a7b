//! ENS registry events.

use alloy_primitives::{Address, B256};

/// Event ABI of the ENS registry.
pub const ABI: &str = r#"[
  {"anonymous":false,"type":"event","name":"NewOwner","inputs":[
    {"indexed":true,"name":"node","type":"bytes32"},
    {"indexed":true,"name":"label","type":"bytes32"},
    {"indexed":false,"name":"owner","type":"address"}]},
  {"anonymous":false,"type":"event","name":"Transfer","inputs":[
    {"indexed":true,"name":"node","type":"bytes32"},
    {"indexed":false,"name":"owner","type":"address"}]},
  {"anonymous":false,"type":"event","name":"NewResolver","inputs":[
    {"indexed":true,"name":"node","type":"bytes32"},
    {"indexed":false,"name":"resolver","type":"address"}]},
  {"anonymous":false,"type":"event","name":"NewTTL","inputs":[
    {"indexed":true,"name":"node","type":"bytes32"},
    {"indexed":false,"name":"ttl","type":"uint64"}]}
]"#;

contract_event! {
    /// Logged when the owner of a node assigns a new owner to a subnode.
    pub struct NewOwner {
        indexed {
            node("node"): B256 = FixedBytes(32),
            label("label"): B256 = FixedBytes(32),
        }
        data {
            owner("owner"): Address = Address,
        }
    }
}

contract_event! {
    /// Logged when the owner of a node transfers ownership to a new account.
    pub struct Transfer {
        indexed {
            node("node"): B256 = FixedBytes(32),
        }
        data {
            owner("owner"): Address = Address,
        }
    }
}

contract_event! {
    /// Logged when the resolver for a node changes.
    pub struct NewResolver {
        indexed {
            node("node"): B256 = FixedBytes(32),
        }
        data {
            resolver("resolver"): Address = Address,
        }
    }
}

contract_event! {
    /// Logged when the TTL of a node changes.
    pub struct NewTTL {
        indexed {
            node("node"): B256 = FixedBytes(32),
        }
        data {
            ttl("ttl"): u64 = Uint(64),
        }
    }
}

bound_contract! {
    /// The ENS registry bound to a deployed address.
    pub struct EnsRegistry: RegistryEvent, abi = ABI, {
        NewOwner,
        Transfer,
        NewResolver,
        NewTTL,
    }
}
