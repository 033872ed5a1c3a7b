//! Username registrar events.

use alloy_primitives::{Address, B256, U256};

/// Event ABI of the username registrar.
pub const ABI: &str = r#"[
  {"anonymous":false,"type":"event","name":"RegistryState","inputs":[
    {"indexed":false,"name":"state","type":"uint8"}]},
  {"anonymous":false,"type":"event","name":"RegistryPrice","inputs":[
    {"indexed":false,"name":"price","type":"uint256"}]},
  {"anonymous":false,"type":"event","name":"RegistryMoved","inputs":[
    {"indexed":false,"name":"newRegistry","type":"address"}]},
  {"anonymous":false,"type":"event","name":"UsernameOwner","inputs":[
    {"indexed":true,"name":"nameHash","type":"bytes32"},
    {"indexed":false,"name":"owner","type":"address"}]}
]"#;

/// Registrar lifecycle states carried by [`RegistryState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrarState {
    Inactive,
    Active,
    Moved,
}

impl TryFrom<u8> for RegistrarState {
    type Error = u8;

    fn try_from(state: u8) -> Result<Self, Self::Error> {
        match state {
            0 => Ok(Self::Inactive),
            1 => Ok(Self::Active),
            2 => Ok(Self::Moved),
            other => Err(other),
        }
    }
}

contract_event! {
    /// Logged when the registrar changes state.
    pub struct RegistryState {
        indexed {}
        data {
            state("state"): u8 = Uint(8),
        }
    }
}

impl RegistryState {
    /// The state as a [`RegistrarState`]; `Err` carries an unknown raw value.
    pub fn registrar_state(&self) -> Result<RegistrarState, u8> {
        RegistrarState::try_from(self.state)
    }
}

contract_event! {
    /// Logged when the registration price changes.
    pub struct RegistryPrice {
        indexed {}
        data {
            price("price"): U256 = Uint(256),
        }
    }
}

contract_event! {
    /// Logged when the registrar moves to a new registry contract.
    pub struct RegistryMoved {
        indexed {}
        data {
            new_registry("newRegistry"): Address = Address,
        }
    }
}

contract_event! {
    /// Logged when a username changes owner.
    pub struct UsernameOwner {
        indexed {
            name_hash("nameHash"): B256 = FixedBytes(32),
        }
        data {
            owner("owner"): Address = Address,
        }
    }
}

bound_contract! {
    /// The username registrar bound to a deployed address.
    pub struct UsernameRegistrar: RegistrarEvent, abi = ABI, {
        RegistryState,
        RegistryPrice,
        RegistryMoved,
        UsernameOwner,
    }
}
