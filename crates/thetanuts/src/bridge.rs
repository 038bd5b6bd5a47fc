//! The Thetanuts Paradigm bridge contract.
//!
//! One bridge serves every vault on a chain; all reads go through
//! `getAuctionDetails(vault)`.

use alloy::{
    primitives::{Address, U256},
    sol,
};
use evm_commons::{ContractConnection, Domain, contract::parse_address, erc20::to_decimal};
use sdk_commons::{
    SdkError,
    config::{BidParams, BidValidation, ContractConfig, OfferDetails, OfferTokenDetails},
    error::Result,
    helpers::split_evm_signature,
};

use crate::definitions::{Bid, bid_domain, offer_id_to_vault};

sol! {
    #[sol(rpc)]
    contract ParadigmBridge {
        function getAuctionDetails(address vault) external view returns (
            address collateralAsset,
            address underlyingAsset,
            address strikeAsset,
            uint256 strikePrice,
            uint256 expiryTimestamp,
            bool isPut,
            uint256 auctionSize
        );
    }
}

/// Bridge strikes are quoted with 6 decimals.
const STRIKE_DECIMALS: u8 = 6;

pub struct BridgeContract {
    connection: ContractConnection,
}

impl BridgeContract {
    pub async fn connect(config: &ContractConfig) -> Result<Self> {
        Ok(Self { connection: ContractConnection::connect(config).await? })
    }

    pub fn domain(&self) -> Domain {
        bid_domain(self.connection.chain().id(), self.connection.address())
    }

    async fn auction_details(
        &self,
        vault: Address,
    ) -> Result<ParadigmBridge::getAuctionDetailsReturn> {
        let bridge =
            ParadigmBridge::new(self.connection.address(), self.connection.provider().clone());
        let details = bridge
            .getAuctionDetails(vault)
            .call()
            .await
            .map_err(|_| SdkError::UnknownOffer(vault.to_string()))?;
        tracing::debug!(%vault, size = %details.auctionSize, "fetched auction details");
        Ok(details)
    }

    pub async fn get_offer_token_details(&self, vault: Address) -> Result<OfferTokenDetails> {
        let details = self.auction_details(vault).await?;
        Ok(OfferTokenDetails {
            collateral_asset: details.collateralAsset.to_string(),
            underlying_asset: details.underlyingAsset.to_string(),
            strike_asset: details.strikeAsset.to_string(),
            strike_price: to_decimal(details.strikePrice, STRIKE_DECIMALS)?,
            expiry_timestamp: details.expiryTimestamp.to::<u64>(),
            is_put: details.isPut,
        })
    }

    /// The vault plays both seller and offer token; the auction has no
    /// minimum price or bid size.
    pub async fn get_offer_details(&self, offer_id: U256) -> Result<OfferDetails> {
        let vault = offer_id_to_vault(offer_id)?;
        let details = self.auction_details(vault).await?;
        Ok(OfferDetails {
            seller: vault.to_string(),
            offer_token: vault.to_string(),
            bidding_token: details.collateralAsset.to_string(),
            min_price: U256::ZERO,
            min_bid_size: U256::ZERO,
            total_size: details.auctionSize,
            available_size: details.auctionSize,
        })
    }

    /// Checks that the signature recovers to the stated signer wallet for
    /// this auction's bid payload.
    pub async fn validate_bid(&self, bid: &BidParams, signature: &str) -> Result<BidValidation> {
        let mut validation = BidValidation::valid();

        let (r, s, v) = split_evm_signature(signature)?;
        let signer_wallet = parse_address(&bid.signer_wallet)?;

        let payload = Bid {
            vaultAddress: offer_id_to_vault(bid.swap_id)?,
            nonce: U256::from(bid.nonce),
            signerWallet: signer_wallet,
            sellAmount: bid.sell_amount,
            buyAmount: bid.buy_amount,
            referrer: parse_address(&bid.referrer)?,
        };

        let signature = alloy::primitives::Signature::from_scalars_and_parity(r, s, v >= 28);
        match signature.recover_address_from_prehash(&self.domain().signing_hash(&payload)) {
            Ok(recovered) if recovered == signer_wallet => {},
            Ok(_) | Err(_) => validation.push("signature does not recover to the signer wallet"),
        }

        Ok(validation)
    }
}
