//! ERC-20 token events.

use alloy_primitives::{Address, U256};

/// Event ABI of the ERC-20 token.
pub const ABI: &str = r#"[
  {"anonymous":false,"type":"event","name":"Transfer","inputs":[
    {"indexed":true,"name":"_from","type":"address"},
    {"indexed":true,"name":"_to","type":"address"},
    {"indexed":false,"name":"_value","type":"uint256"}]},
  {"anonymous":false,"type":"event","name":"Approval","inputs":[
    {"indexed":true,"name":"_owner","type":"address"},
    {"indexed":true,"name":"_spender","type":"address"},
    {"indexed":false,"name":"_value","type":"uint256"}]}
]"#;

contract_event! {
    /// Logged when tokens move between accounts.
    pub struct Transfer {
        indexed {
            from("_from"): Address = Address,
            to("_to"): Address = Address,
        }
        data {
            value("_value"): U256 = Uint(256),
        }
    }
}

contract_event! {
    /// Logged when an owner approves a spender.
    pub struct Approval {
        indexed {
            owner("_owner"): Address = Address,
            spender("_spender"): Address = Address,
        }
        data {
            value("_value"): U256 = Uint(256),
        }
    }
}

bound_contract! {
    /// An ERC-20 token bound to a deployed address.
    pub struct Erc20Token: TokenEvent, abi = ABI, {
        Transfer,
        Approval,
    }
}
