//! Thetanuts venue adapter.
//!
//! Thetanuts auctions are read through a per-chain Paradigm bridge contract
//! keyed by vault address. Offer IDs encode the vault address as an integer;
//! no transaction is sent to open an auction, so `create_offer` just returns
//! the vault's offer ID.

pub mod bridge;
pub mod definitions;

use alloy::primitives::U256;
use evm_commons::{Wallet, contract::parse_address, wallet::signature_hex};
use sdk_commons::{
    Chain,
    config::{
        AuthorizationPages, BidValidation, ContractConfig, CreateOfferParams, OfferDetails,
        OfferQuery, OfferTokenDetails, SdkConfig, SignBidParams, SignedBidParams,
    },
    error::Result,
};

use crate::{
    bridge::BridgeContract,
    definitions::{Bid, bid_domain, offer_id_to_vault, vault_to_offer_id},
};

#[derive(Clone, Copy, Debug, Default)]
pub struct ThetanutsSdk;

impl SdkConfig for ThetanutsSdk {
    fn authorization_pages(&self) -> AuthorizationPages {
        AuthorizationPages {
            mainnet: "https://thetanuts.finance/paradigm/mm-approval",
            testnet: "https://thetanuts.finance/paradigm/mm-matic-approval",
        }
    }

    fn supported_chains(&self) -> &'static [Chain] {
        &[Chain::Ethereum, Chain::Matic]
    }

    /// Auctions are opened by the vaults themselves; the adapter only maps
    /// the offered vault to its offer ID.
    async fn create_offer(
        &self,
        _config: &ContractConfig,
        params: &CreateOfferParams,
    ) -> Result<String> {
        let vault = parse_address(&params.offer_token)?;
        Ok(vault_to_offer_id(vault).to_string())
    }

    /// For Thetanuts the configured address is the vault under auction.
    async fn get_offer_token_details(
        &self,
        config: &ContractConfig,
        query: &OfferQuery,
    ) -> Result<OfferTokenDetails> {
        let bridge = BridgeContract::connect(config).await?;
        bridge
            .get_offer_token_details(offer_id_to_vault(query.offer_id)?)
            .await
    }

    async fn get_offer_details(
        &self,
        config: &ContractConfig,
        query: &OfferQuery,
    ) -> Result<OfferDetails> {
        let bridge = BridgeContract::connect(config).await?;
        bridge.get_offer_details(query.offer_id).await
    }

    async fn sign_bid(&self, config: &ContractConfig, params: &SignBidParams) -> Result<String> {
        let wallet = Wallet::new(Some(&params.public_key), Some(&params.private_key))?;
        let domain = bid_domain(config.chain.id(), parse_address(&config.address)?);
        let bid = Bid {
            vaultAddress: offer_id_to_vault(params.bid.swap_id)?,
            nonce: U256::from(params.bid.nonce),
            signerWallet: parse_address(&params.bid.signer_wallet)?,
            sellAmount: params.bid.sell_amount,
            buyAmount: params.bid.buy_amount,
            referrer: parse_address(&params.bid.referrer)?,
        };
        let signature = wallet.sign_typed(&domain, &bid)?;
        Ok(signature_hex(&signature))
    }

    async fn validate_bid(
        &self,
        config: &ContractConfig,
        bid: &SignedBidParams,
    ) -> Result<BidValidation> {
        let bridge = BridgeContract::connect(config).await?;
        bridge.validate_bid(&bid.bid, &bid.signature).await
    }

    async fn verify_allowance(
        &self,
        config: &ContractConfig,
        public_key: &str,
        token_address: &str,
    ) -> Result<bool> {
        let wallet = Wallet::from_address(public_key)?;
        wallet.verify_allowance(config, token_address).await
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{Address, B256};

    use super::*;

    #[test]
    fn chain_support() {
        let sdk = ThetanutsSdk;
        assert!(sdk.supports_chain(Chain::Ethereum));
        assert!(sdk.supports_chain(Chain::Matic));
        assert!(!sdk.supports_chain(Chain::Ropsten));
    }

    #[tokio::test]
    async fn create_offer_returns_vault_id() {
        let sdk = ThetanutsSdk;
        let config = ContractConfig::new(
            "0x0000000000000000000000000000000000000001",
            Chain::Matic,
            "http://localhost:8545",
        );
        let vault = Address::repeat_byte(0xcd);
        let params = CreateOfferParams {
            offer_token: vault.to_string(),
            bidding_token: Address::ZERO.to_string(),
            min_price: U256::ZERO,
            min_bid_size: U256::ZERO,
            offer_amount: U256::ZERO,
            public_key: Address::ZERO.to_string(),
            private_key: B256::repeat_byte(0x42).to_string(),
            options_contract: None,
            counterparty: None,
        };

        let offer_id = sdk.create_offer(&config, &params).await.unwrap();
        let expected = vault_to_offer_id(vault).to_string();
        assert_eq!(offer_id, expected);
        assert_eq!(
            offer_id_to_vault(offer_id.parse().unwrap()).unwrap(),
            vault
        );
    }

    #[tokio::test]
    async fn signed_bid_recovers_to_signer() {
        let sdk = ThetanutsSdk;
        let wallet = Wallet::from_private_key(&B256::repeat_byte(0x42).to_string()).unwrap();
        let config = ContractConfig::new(
            "0x0000000000000000000000000000000000000001",
            Chain::Ethereum,
            "http://localhost:8545",
        );
        let vault = Address::repeat_byte(0xcd);

        let bid = sdk_commons::config::BidParams {
            swap_id: vault_to_offer_id(vault),
            nonce: 1,
            signer_wallet: wallet.address().to_string(),
            sell_amount: U256::from(6_000_000u64),
            buy_amount: U256::from(1_000_000_000u64),
            referrer: Address::ZERO.to_string(),
        };
        let params = SignBidParams {
            bid: bid.clone(),
            public_key: wallet.address().to_string(),
            private_key: B256::repeat_byte(0x42).to_string(),
        };

        let wire = sdk.sign_bid(&config, &params).await.unwrap();

        let domain = bid_domain(Chain::Ethereum.id(), parse_address(&config.address).unwrap());
        let payload = Bid {
            vaultAddress: vault,
            nonce: U256::from(bid.nonce),
            signerWallet: wallet.address(),
            sellAmount: bid.sell_amount,
            buyAmount: bid.buy_amount,
            referrer: Address::ZERO,
        };
        let signature: alloy::primitives::Signature =
            alloy::hex::decode(&wire).unwrap().as_slice().try_into().unwrap();
        let recovered = signature
            .recover_address_from_prehash(&domain.signing_hash(&payload))
            .unwrap();
        assert_eq!(recovered, wallet.address());
    }
}
