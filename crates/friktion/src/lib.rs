//! Friktion venue adapter (Solana).
//!
//! Offers are `SwapOrder` accounts of an Anchor swap program, derived as
//! PDAs of their creator, so most operations need the seller's public key on
//! top of the numeric order ID. Bids are ed25519-signed byte messages and
//! allowances are SPL token delegations to the program's global delegate
//! authority.

pub mod accounts;
pub mod bid;
pub mod instruction;
pub mod network;
pub mod offer;
pub mod pda;
pub mod swap;

use std::str::FromStr;

use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};
use solana_system_interface::program as system_program;
use spl_associated_token_account::get_associated_token_address;

use sdk_commons::{
    Chain, SdkError, U256,
    config::{
        AuthorizationPages, BidValidation, ContractConfig, CreateOfferParams, OfferDetails,
        OfferQuery, OfferTokenDetails, SdkConfig, SignBidParams, SignedBidParams,
    },
    error::Result,
};

use crate::{
    bid::BidDetails,
    network::Network,
    swap::{SwapContract, SwapOrderTemplate},
};

fn parse_pubkey(address: &str) -> Result<Pubkey> {
    Pubkey::from_str(address).map_err(|_| SdkError::InvalidAddress(address.to_string()))
}

fn parse_keypair(private_key: &str) -> Result<Keypair> {
    let bytes = bs58::decode(private_key)
        .into_vec()
        .map_err(|_| SdkError::InvalidArgument("invalid private key".to_string()))?;
    Keypair::try_from(bytes.as_slice())
        .map_err(|_| SdkError::InvalidArgument("invalid private key".to_string()))
}

fn to_u64(value: U256, field: &str) -> Result<u64> {
    if value.bit_len() > 64 {
        return Err(SdkError::InvalidArgument(format!("{field} exceeds u64")));
    }
    Ok(value.to::<u64>())
}

/// `BidParams` carries EVM-style sell/buy amounts; the swap program thinks
/// in bid size (option tokens bought) and per-token price.
fn bid_price(sell_amount: U256, buy_amount: U256) -> Result<u64> {
    if buy_amount.is_zero() {
        return Err(SdkError::InvalidArgument("buy amount is zero".to_string()));
    }
    to_u64(sell_amount / buy_amount, "bid price")
}

fn bid_from_params(
    owner: Pubkey,
    bid: &sdk_commons::config::BidParams,
) -> Result<BidDetails> {
    Ok(BidDetails {
        swap_order_owner: owner,
        order_id: to_u64(bid.swap_id, "order id")?,
        signer_wallet: parse_pubkey(&bid.signer_wallet)?,
        bid_size: to_u64(bid.buy_amount, "bid size")?,
        bid_price: bid_price(bid.sell_amount, bid.buy_amount)?,
    })
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FriktionSdk;

impl FriktionSdk {
    fn contract(&self, config: &ContractConfig) -> Result<SwapContract> {
        Ok(SwapContract::new(Network::from_chain(config.chain)?))
    }
}

impl SdkConfig for FriktionSdk {
    fn authorization_pages(&self) -> AuthorizationPages {
        AuthorizationPages {
            mainnet: "https://app.friktion.fi/approve",
            testnet: "https://devnet.friktion.fi/approve",
        }
    }

    fn supported_chains(&self) -> &'static [Chain] {
        &[Chain::SolanaDev, Chain::SolanaMain]
    }

    async fn create_offer(
        &self,
        config: &ContractConfig,
        params: &CreateOfferParams,
    ) -> Result<String> {
        let keypair = parse_keypair(&params.private_key)?;
        if keypair.pubkey() != parse_pubkey(&params.public_key)? {
            return Err(SdkError::InvalidArgument(
                "public key does not match private key".to_string(),
            ));
        }

        let options_contract = params
            .options_contract
            .as_deref()
            .ok_or_else(|| {
                SdkError::InvalidArgument("an options contract is required".to_string())
            })
            .and_then(parse_pubkey)?;

        let contract = self.contract(config)?;
        let expiry = contract.get_options_contract(&options_contract).await?.expiry_ts;

        let give_mint = parse_pubkey(&params.offer_token)?;
        let receive_mint = parse_pubkey(&params.bidding_token)?;
        let give_size = to_u64(params.offer_amount, "offer amount")?;
        let receive_size = to_u64(
            params
                .min_price
                .checked_mul(params.offer_amount)
                .ok_or_else(|| {
                    SdkError::InvalidArgument("offer value overflows".to_string())
                })?,
            "receive size",
        )?;

        let counterparty = params.counterparty.as_deref().map(parse_pubkey).transpose()?;

        let template = SwapOrderTemplate {
            give_size,
            receive_size,
            expiry,
            give_mint,
            receive_mint,
            creator_give_pool: get_associated_token_address(&keypair.pubkey(), &give_mint),
            counterparty: counterparty.unwrap_or_else(|| keypair.pubkey()),
            is_counterparty_provided: counterparty.is_some(),
            is_whitelisted: false,
            // whitelisting is off, the program ignores this mint
            whitelist_token_mint: system_program::ID,
            options_contract,
        };

        // the order id, with the creator as seller, is what offer queries
        // take; the PDA is derived from the two
        let (order, _) = contract.create_offer(&keypair, template).await?;
        Ok(order.order_id.to_string())
    }

    async fn get_offer_token_details(
        &self,
        config: &ContractConfig,
        query: &OfferQuery,
    ) -> Result<OfferTokenDetails> {
        let seller = query.seller.as_deref().ok_or_else(|| {
            SdkError::InvalidArgument("a seller public key is required".to_string())
        })?;
        self.contract(config)?
            .get_offered_token_details(&parse_pubkey(seller)?, to_u64(query.offer_id, "order id")?)
            .await
    }

    async fn get_offer_details(
        &self,
        config: &ContractConfig,
        query: &OfferQuery,
    ) -> Result<OfferDetails> {
        let seller = query.seller.as_deref().ok_or_else(|| {
            SdkError::InvalidArgument("a seller public key is required".to_string())
        })?;
        let offer = self
            .contract(config)?
            .get_offer(&parse_pubkey(seller)?, to_u64(query.offer_id, "order id")?)
            .await?;

        Ok(OfferDetails {
            seller: offer.seller.to_string(),
            offer_token: offer.offer_token.to_string(),
            bidding_token: offer.bidding_token.to_string(),
            min_price: U256::from(offer.min_price),
            min_bid_size: U256::from(offer.min_bid_size),
            total_size: U256::from(offer.offer_amount),
            available_size: U256::from(offer.offer_amount),
        })
    }

    async fn sign_bid(&self, _config: &ContractConfig, params: &SignBidParams) -> Result<String> {
        let keypair = parse_keypair(&params.private_key)?;
        // the message does not cover the order's creator, any owner works
        let bid = bid_from_params(keypair.pubkey(), &params.bid)?;
        let signature = bid.sign(&keypair)?;
        Ok(signature.to_string())
    }

    async fn validate_bid(
        &self,
        config: &ContractConfig,
        bid: &SignedBidParams,
    ) -> Result<BidValidation> {
        let seller = bid.seller.as_deref().ok_or_else(|| {
            SdkError::InvalidArgument("a seller public key is required".to_string())
        })?;
        let details = bid_from_params(parse_pubkey(seller)?, &bid.bid)?;
        self.contract(config)?
            .validate_bid(&details, &bid.signature)
            .await
    }

    async fn verify_allowance(
        &self,
        config: &ContractConfig,
        public_key: &str,
        token_address: &str,
    ) -> Result<bool> {
        self.contract(config)?
            .verify_allowance(&parse_pubkey(token_address)?, &parse_pubkey(public_key)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_support() {
        let sdk = FriktionSdk;
        assert!(sdk.supports_chain(Chain::SolanaDev));
        assert!(sdk.supports_chain(Chain::SolanaMain));
        assert!(!sdk.supports_chain(Chain::Ethereum));
    }

    #[test]
    fn bid_price_is_sell_over_buy() {
        assert_eq!(
            bid_price(U256::from(600u64), U256::from(100u64)).unwrap(),
            6
        );
        assert!(bid_price(U256::from(1u64), U256::ZERO).is_err());
    }

    #[tokio::test]
    async fn signed_bid_verifies() {
        let sdk = FriktionSdk;
        let keypair = Keypair::new();
        let config = ContractConfig::new("", Chain::SolanaDev, "");

        let bid = sdk_commons::config::BidParams {
            swap_id: U256::from(3u64),
            nonce: 0,
            signer_wallet: keypair.pubkey().to_string(),
            sell_amount: U256::from(600u64),
            buy_amount: U256::from(100u64),
            referrer: Pubkey::default().to_string(),
        };
        let params = SignBidParams {
            bid: bid.clone(),
            public_key: keypair.pubkey().to_string(),
            private_key: keypair.to_base58_string(),
        };

        let signature = sdk.sign_bid(&config, &params).await.unwrap();

        let details = bid_from_params(keypair.pubkey(), &bid).unwrap();
        assert!(details.verify(&signature).unwrap());
    }

    #[test]
    fn created_offer_ids_feed_back_into_queries() {
        let order_id = 7u64;
        let offer_id: U256 = order_id.to_string().parse().unwrap();
        assert_eq!(to_u64(offer_id, "order id").unwrap(), order_id);
    }

    #[test]
    fn keypair_round_trips_through_base58() {
        let keypair = Keypair::new();
        let parsed = parse_keypair(&keypair.to_base58_string()).unwrap();
        assert_eq!(parsed.pubkey(), keypair.pubkey());
        assert!(parse_keypair("not base58").is_err());
    }
}
