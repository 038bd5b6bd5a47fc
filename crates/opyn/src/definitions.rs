//! Typed-data definitions for the Opyn RFQ settlement.

use alloy::{primitives::Address, sol};
use evm_commons::Domain;

pub const DOMAIN_NAME: &str = "OPYN RFQ";
pub const DOMAIN_VERSION: &str = "1";

sol! {
    /// What each side of an RFQ signs. `nonces` is the trader's current
    /// settlement-contract nonce at signing time.
    struct Message {
        uint256 bidId;
        address trader;
        address token;
        uint256 amount;
        uint256 nonces;
    }
}

/// Domain under which [`Message`]s are signed for a given settlement
/// deployment.
pub fn message_domain(chain_id: u64, verifying_contract: Address) -> Domain {
    Domain::new(DOMAIN_NAME, DOMAIN_VERSION, chain_id, verifying_contract)
}

#[cfg(test)]
mod tests {
    use alloy_sol_types::SolStruct;

    use super::*;

    #[test]
    fn message_type_string() {
        assert_eq!(
            Message::eip712_root_type(),
            "Message(uint256 bidId,address trader,address token,\
             uint256 amount,uint256 nonces)"
        );
    }

    #[test]
    fn separator_matches_across_instances() {
        let a = message_domain(3, Address::repeat_byte(0x0e));
        let b = message_domain(3, Address::repeat_byte(0x0e));
        assert_eq!(a.separator(), b.separator());
    }
}
