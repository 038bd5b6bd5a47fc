//! Ribbon Finance venue adapter.
//!
//! Offers live in Ribbon's Swap contract, bids are EIP-712 `Bid` structs
//! signed under the `RIBBON SWAP` domain, and bid validation is delegated to
//! the contract's own `check` function.

pub mod definitions;
pub mod otoken;
pub mod swap;

use evm_commons::{Wallet, wallet::signature_hex};
use sdk_commons::{
    Chain,
    config::{
        AuthorizationPages, BidValidation, ContractConfig, CreateOfferParams, OfferDetails,
        OfferQuery, OfferTokenDetails, SdkConfig, SignBidParams, SignedBidParams,
    },
    error::Result,
};

use crate::{
    definitions::{Bid, bid_domain},
    otoken::OtokenContract,
    swap::SwapContract,
};

use evm_commons::contract::parse_address;

#[derive(Clone, Copy, Debug, Default)]
pub struct RibbonSdk;

impl SdkConfig for RibbonSdk {
    fn authorization_pages(&self) -> AuthorizationPages {
        AuthorizationPages {
            mainnet: "https://auction.ribbon.finance/approval",
            testnet: "https://auction-frontend-git-staging-ribbon-finance.vercel.app/approval",
        }
    }

    fn supported_chains(&self) -> &'static [Chain] {
        &[Chain::Ethereum, Chain::Avalanche, Chain::Fuji]
    }

    async fn create_offer(
        &self,
        config: &ContractConfig,
        params: &CreateOfferParams,
    ) -> Result<String> {
        let wallet = Wallet::new(Some(&params.public_key), Some(&params.private_key))?;
        let swap = SwapContract::connect_with_signer(config, wallet.signer()?).await?;
        let swap_id = swap
            .create_offer(
                &params.offer_token,
                &params.bidding_token,
                params.min_price,
                params.min_bid_size,
                params.offer_amount,
            )
            .await?;
        Ok(swap_id.to_string())
    }

    /// For Ribbon the configured address is the oToken itself.
    async fn get_offer_token_details(
        &self,
        config: &ContractConfig,
        _query: &OfferQuery,
    ) -> Result<OfferTokenDetails> {
        let otoken = OtokenContract::connect(config).await?;
        otoken.get_otoken_details().await
    }

    async fn get_offer_details(
        &self,
        config: &ContractConfig,
        query: &OfferQuery,
    ) -> Result<OfferDetails> {
        let swap = SwapContract::connect(config).await?;
        swap.get_offer_details(query.offer_id).await
    }

    async fn sign_bid(&self, config: &ContractConfig, params: &SignBidParams) -> Result<String> {
        let wallet = Wallet::new(Some(&params.public_key), Some(&params.private_key))?;
        let domain = bid_domain(config.chain.id(), parse_address(&config.address)?);
        let bid = Bid {
            swapId: params.bid.swap_id,
            nonce: alloy::primitives::U256::from(params.bid.nonce),
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
        let swap = SwapContract::connect(config).await?;
        swap.validate_bid(&bid.bid, &bid.signature).await
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
    use alloy::primitives::{Address, B256, U256};
    use sdk_commons::helpers::split_evm_signature;

    use super::*;

    #[test]
    fn chain_support() {
        let sdk = RibbonSdk;
        assert!(sdk.supports_chain(Chain::Ethereum));
        assert!(sdk.supports_chain(Chain::Fuji));
        assert!(!sdk.supports_chain(Chain::Matic));
        assert!(!sdk.supports_chain(Chain::SolanaMain));
    }

    #[tokio::test]
    async fn signed_bid_recovers_to_signer() {
        let sdk = RibbonSdk;
        let wallet = Wallet::from_private_key(&B256::repeat_byte(0x42).to_string()).unwrap();
        let config = ContractConfig::new(
            "0x58848824baEb9678847aF487CB02EAba782FECB5",
            Chain::Ethereum,
            "http://localhost:8545",
        );

        let bid = sdk_commons::config::BidParams {
            swap_id: U256::from(1u64),
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
        let (_, _, v) = split_evm_signature(&wire).unwrap();
        assert!(v == 27 || v == 28);

        let domain = bid_domain(Chain::Ethereum.id(), parse_address(&config.address).unwrap());
        let payload = Bid {
            swapId: bid.swap_id,
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
