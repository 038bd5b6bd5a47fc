//! Opyn RFQ venue adapter.
//!
//! Both sides of an RFQ sign an EIP-712 `Message` under the `OPYN RFQ`
//! domain; the settlement contract checks the signatures when `settleRfq` is
//! called. Bid validation is local: recompute the domain, recover the signer
//! and check the nonce against the contract.

pub mod definitions;
pub mod otoken;
pub mod settlement;

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

use crate::{definitions::Message, otoken::OtokenContract, settlement::SettlementContract};

#[derive(Clone, Copy, Debug, Default)]
pub struct OpynSdk;

impl SdkConfig for OpynSdk {
    fn authorization_pages(&self) -> AuthorizationPages {
        AuthorizationPages {
            mainnet: "https://notdefined.yet/auctions/",
            testnet: "https://notdefined.yet/auctions/",
        }
    }

    fn supported_chains(&self) -> &'static [Chain] {
        &[Chain::Ethereum, Chain::Ropsten]
    }

    async fn create_offer(
        &self,
        config: &ContractConfig,
        params: &CreateOfferParams,
    ) -> Result<String> {
        let wallet = Wallet::new(Some(&params.public_key), Some(&params.private_key))?;
        let settlement = SettlementContract::connect_with_signer(config, wallet.signer()?).await?;
        let swap_id = settlement
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

    /// For Opyn the configured address is the oToken itself.
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
        let settlement = SettlementContract::connect(config).await?;
        settlement.get_offer_details(query.offer_id).await
    }

    /// Signs a [`Message`] for the bid. The token and amount come from the
    /// offer's bidding side; the nonce is the one supplied by the caller.
    async fn sign_bid(&self, config: &ContractConfig, params: &SignBidParams) -> Result<String> {
        let wallet = Wallet::new(Some(&params.public_key), Some(&params.private_key))?;
        let trader = parse_address(&params.bid.signer_wallet)?;
        if trader != wallet.address() {
            return Err(sdk_commons::SdkError::InvalidArgument(
                "signer wallet does not match the signing key".to_string(),
            ));
        }

        let settlement = SettlementContract::connect(config).await?;
        let offer = settlement.get_offer_details(params.bid.swap_id).await?;

        let message = Message {
            bidId: params.bid.swap_id,
            trader,
            token: parse_address(&offer.bidding_token)?,
            amount: params.bid.sell_amount,
            nonces: U256::from(params.bid.nonce),
        };
        let signature = wallet.sign_typed(&settlement.domain(), &message)?;
        Ok(signature_hex(&signature))
    }

    async fn validate_bid(
        &self,
        config: &ContractConfig,
        bid: &SignedBidParams,
    ) -> Result<BidValidation> {
        let settlement = SettlementContract::connect(config).await?;
        settlement.validate_bid(&bid.bid, &bid.signature).await
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
