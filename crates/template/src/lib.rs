//! Starting point for a new EVM venue.
//!
//! Copy this crate, rename the package, then fill in the venue's domain
//! name, contract ABI, authorization pages and supported chains. The
//! structure mirrors the Ribbon adapter, which is the fullest EVM example.

use alloy::{
    primitives::{Address, U256},
    sol,
};
use evm_commons::{
    ContractConnection, Domain, Wallet,
    contract::parse_address,
    wallet::signature_hex,
};
use sdk_commons::{
    Chain, SdkError,
    config::{
        AuthorizationPages, BidValidation, ContractConfig, CreateOfferParams, OfferDetails,
        OfferQuery, OfferTokenDetails, SdkConfig, SignBidParams, SignedBidParams,
    },
    error::Result,
    helpers::split_evm_signature,
};

pub const DOMAIN_NAME: &str = "TEMPLATE SWAP";
pub const DOMAIN_VERSION: &str = "1";

sol! {
    struct Bid {
        uint256 swapId;
        uint256 nonce;
        address signerWallet;
        uint256 sellAmount;
        uint256 buyAmount;
        address referrer;
    }

    #[sol(rpc)]
    contract TemplateSwap {
        function swapOffers(uint256 swapId) external view returns (
            address seller,
            address oToken,
            uint96 minPrice,
            address biddingToken,
            uint96 minBidSize,
            uint128 totalSize,
            uint128 availableSize
        );

        function getOtokenDetails() external view returns (
            address collateralAsset,
            address underlyingAsset,
            address strikeAsset,
            uint256 strikePrice,
            uint256 expiryTimestamp,
            bool isPut
        );
    }
}

pub fn bid_domain(chain_id: u64, verifying_contract: Address) -> Domain {
    Domain::new(DOMAIN_NAME, DOMAIN_VERSION, chain_id, verifying_contract)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateSdk;

impl SdkConfig for TemplateSdk {
    fn authorization_pages(&self) -> AuthorizationPages {
        AuthorizationPages {
            mainnet: "https://change.me/approval",
            testnet: "https://change.me/approval",
        }
    }

    fn supported_chains(&self) -> &'static [Chain] {
        &[Chain::Kovan]
    }

    /// The template venue has no offer transaction; wire up the venue
    /// contract's create call here.
    async fn create_offer(
        &self,
        _config: &ContractConfig,
        _params: &CreateOfferParams,
    ) -> Result<String> {
        Err(SdkError::Unsupported("create_offer"))
    }

    async fn get_offer_token_details(
        &self,
        config: &ContractConfig,
        _query: &OfferQuery,
    ) -> Result<OfferTokenDetails> {
        let connection = ContractConnection::connect(config).await?;
        let contract = TemplateSwap::new(connection.address(), connection.provider().clone());
        let details = contract
            .getOtokenDetails()
            .call()
            .await
            .map_err(SdkError::rpc)?;

        Ok(OfferTokenDetails {
            collateral_asset: details.collateralAsset.to_string(),
            underlying_asset: details.underlyingAsset.to_string(),
            strike_asset: details.strikeAsset.to_string(),
            strike_price: evm_commons::erc20::to_decimal(details.strikePrice, 8)?,
            expiry_timestamp: details.expiryTimestamp.to::<u64>(),
            is_put: details.isPut,
        })
    }

    async fn get_offer_details(
        &self,
        config: &ContractConfig,
        query: &OfferQuery,
    ) -> Result<OfferDetails> {
        let connection = ContractConnection::connect(config).await?;
        let contract = TemplateSwap::new(connection.address(), connection.provider().clone());
        let offer = contract
            .swapOffers(query.offer_id)
            .call()
            .await
            .map_err(SdkError::rpc)?;

        if offer.seller == Address::ZERO {
            return Err(SdkError::UnknownOffer(query.offer_id.to_string()));
        }

        Ok(OfferDetails {
            seller: offer.seller.to_string(),
            offer_token: offer.oToken.to_string(),
            bidding_token: offer.biddingToken.to_string(),
            min_price: U256::from(offer.minPrice),
            min_bid_size: U256::from(offer.minBidSize),
            total_size: U256::from(offer.totalSize),
            available_size: U256::from(offer.availableSize),
        })
    }

    async fn sign_bid(&self, config: &ContractConfig, params: &SignBidParams) -> Result<String> {
        let wallet = Wallet::new(Some(&params.public_key), Some(&params.private_key))?;
        let domain = bid_domain(config.chain.id(), parse_address(&config.address)?);
        let bid = Bid {
            swapId: params.bid.swap_id,
            nonce: U256::from(params.bid.nonce),
            signerWallet: parse_address(&params.bid.signer_wallet)?,
            sellAmount: params.bid.sell_amount,
            buyAmount: params.bid.buy_amount,
            referrer: parse_address(&params.bid.referrer)?,
        };
        let signature = wallet.sign_typed(&domain, &bid)?;
        Ok(signature_hex(&signature))
    }

    /// Local recovery only; replace with the venue's own check if it has
    /// one.
    async fn validate_bid(
        &self,
        config: &ContractConfig,
        bid: &SignedBidParams,
    ) -> Result<BidValidation> {
        let mut validation = BidValidation::valid();

        let (r, s, v) = split_evm_signature(&bid.signature)?;
        let signer_wallet = parse_address(&bid.bid.signer_wallet)?;
        let domain = bid_domain(config.chain.id(), parse_address(&config.address)?);
        let payload = Bid {
            swapId: bid.bid.swap_id,
            nonce: U256::from(bid.bid.nonce),
            signerWallet: signer_wallet,
            sellAmount: bid.bid.sell_amount,
            buyAmount: bid.bid.buy_amount,
            referrer: parse_address(&bid.bid.referrer)?,
        };

        let signature = alloy::primitives::Signature::from_scalars_and_parity(r, s, v >= 28);
        match signature.recover_address_from_prehash(&domain.signing_hash(&payload)) {
            Ok(recovered) if recovered == signer_wallet => {},
            Ok(_) | Err(_) => validation.push("signature does not recover to the signer wallet"),
        }

        Ok(validation)
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
    use alloy::primitives::B256;

    use super::*;

    #[tokio::test]
    async fn sign_then_validate_locally() {
        let sdk = TemplateSdk;
        let wallet = Wallet::from_private_key(&B256::repeat_byte(0x42).to_string()).unwrap();
        let config = ContractConfig::new(
            "0x0000000000000000000000000000000000000001",
            Chain::Kovan,
            "http://localhost:8545",
        );

        let bid = sdk_commons::config::BidParams {
            swap_id: U256::from(1u64),
            nonce: 1,
            signer_wallet: wallet.address().to_string(),
            sell_amount: U256::from(100u64),
            buy_amount: U256::from(1u64),
            referrer: Address::ZERO.to_string(),
        };
        let signature = sdk
            .sign_bid(
                &config,
                &SignBidParams {
                    bid: bid.clone(),
                    public_key: wallet.address().to_string(),
                    private_key: B256::repeat_byte(0x42).to_string(),
                },
            )
            .await
            .unwrap();

        let validation = sdk
            .validate_bid(
                &config,
                &SignedBidParams { bid, seller: None, signature },
            )
            .await
            .unwrap();
        assert!(validation.is_valid());
    }
}
