//! Typed-data definitions for the Thetanuts bridge.

use alloy::{
    primitives::{Address, U256},
    sol,
};
use evm_commons::Domain;
use sdk_commons::{SdkError, error::Result};

pub const DOMAIN_NAME: &str = "THETANUTS BRIDGE";
pub const DOMAIN_VERSION: &str = "1";

sol! {
    /// The payload a market maker signs when bidding on a vault auction.
    /// Auctions are identified by the vault itself rather than a numeric
    /// swap ID.
    struct Bid {
        address vaultAddress;
        uint256 nonce;
        address signerWallet;
        uint256 sellAmount;
        uint256 buyAmount;
        address referrer;
    }
}

pub fn bid_domain(chain_id: u64, verifying_contract: Address) -> Domain {
    Domain::new(DOMAIN_NAME, DOMAIN_VERSION, chain_id, verifying_contract)
}

/// Offer IDs are vault addresses carried as integers.
pub fn offer_id_to_vault(offer_id: U256) -> Result<Address> {
    if offer_id.bit_len() > 160 {
        return Err(SdkError::InvalidArgument(format!(
            "offer id does not encode an address: {offer_id}"
        )));
    }
    Ok(Address::from_slice(&offer_id.to_be_bytes::<32>()[12..]))
}

pub fn vault_to_offer_id(vault: Address) -> U256 {
    U256::from_be_slice(vault.as_slice())
}

#[cfg(test)]
mod tests {
    use alloy_sol_types::SolStruct;

    use super::*;

    #[test]
    fn bid_type_string() {
        assert_eq!(
            Bid::eip712_root_type(),
            "Bid(address vaultAddress,uint256 nonce,address signerWallet,\
             uint256 sellAmount,uint256 buyAmount,address referrer)"
        );
    }

    #[test]
    fn offer_id_round_trips() {
        let vault = Address::repeat_byte(0xab);
        let id = vault_to_offer_id(vault);
        assert_eq!(offer_id_to_vault(id).unwrap(), vault);
    }

    #[test]
    fn oversized_offer_id_is_rejected() {
        assert!(offer_id_to_vault(U256::MAX).is_err());
        assert!(offer_id_to_vault(U256::ONE << 160).is_err());
        assert!(offer_id_to_vault((U256::ONE << 160) - U256::ONE).is_ok());
    }
}
