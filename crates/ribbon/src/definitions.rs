//! Typed-data definitions for the Ribbon swap.

use alloy::{primitives::Address, sol};
use evm_commons::Domain;

pub const DOMAIN_NAME: &str = "RIBBON SWAP";
pub const DOMAIN_VERSION: &str = "1";

sol! {
    /// The payload a market maker signs when bidding on an offer.
    struct Bid {
        uint256 swapId;
        uint256 nonce;
        address signerWallet;
        uint256 sellAmount;
        uint256 buyAmount;
        address referrer;
    }
}

/// Domain under which [`Bid`]s are signed for a given swap deployment.
pub fn bid_domain(chain_id: u64, verifying_contract: Address) -> Domain {
    Domain::new(DOMAIN_NAME, DOMAIN_VERSION, chain_id, verifying_contract)
}

#[cfg(test)]
mod tests {
    use alloy_sol_types::SolStruct;

    use super::*;

    #[test]
    fn bid_type_string() {
        assert_eq!(
            Bid::eip712_root_type(),
            "Bid(uint256 swapId,uint256 nonce,address signerWallet,\
             uint256 sellAmount,uint256 buyAmount,address referrer)"
        );
    }

    #[test]
    fn domain_depends_on_deployment() {
        let mainnet = bid_domain(1, Address::repeat_byte(0x11));
        let fuji = bid_domain(43113, Address::repeat_byte(0x11));
        assert_ne!(mainnet.separator(), fuji.separator());
    }
}
