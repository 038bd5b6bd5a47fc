//! The Ribbon swap contract: offers live here, bids are checked here.

use alloy::{
    primitives::{
        Address, U256,
        aliases::U96,
    },
    signers::local::PrivateKeySigner,
    sol,
};
use evm_commons::{ContractConnection, Domain, contract::parse_address};
use sdk_commons::{
    SdkError,
    config::{BidParams, BidValidation, ContractConfig, OfferDetails},
    error::Result,
    helpers::split_evm_signature,
};

use crate::definitions::bid_domain;

sol! {
    #[sol(rpc)]
    contract RibbonSwap {
        struct SignedBid {
            uint256 swapId;
            uint256 nonce;
            address signerWallet;
            uint256 sellAmount;
            uint256 buyAmount;
            address referrer;
            uint8 v;
            bytes32 r;
            bytes32 s;
        }

        event NewOffer(
            uint256 swapId,
            address seller,
            address oToken,
            address biddingToken,
            uint256 minPrice,
            uint256 minBidSize,
            uint256 totalSize
        );

        function createOffer(
            address oToken,
            address biddingToken,
            uint96 minPrice,
            uint96 minBidSize,
            uint128 totalSize
        ) external returns (uint256 swapId);

        function swapOffers(uint256 swapId) external view returns (
            address seller,
            address oToken,
            uint96 minPrice,
            address biddingToken,
            uint96 minBidSize,
            uint128 totalSize,
            uint128 availableSize
        );

        function check(SignedBid calldata bid) external view returns (
            uint256 errCount,
            bytes32[] messages
        );
    }
}

const CREATE_OFFER_GAS: u64 = 150_000;

fn to_u96(value: U256, field: &str) -> Result<U96> {
    if value.bit_len() > 96 {
        return Err(SdkError::InvalidArgument(format!("{field} exceeds uint96")));
    }
    Ok(value.to::<U96>())
}

fn to_u128(value: U256, field: &str) -> Result<u128> {
    if value.bit_len() > 128 {
        return Err(SdkError::InvalidArgument(format!("{field} exceeds uint128")));
    }
    Ok(value.to::<u128>())
}

/// The contract packs its `check` diagnostics into NUL-padded `bytes32`s.
fn decode_check_message(raw: &[u8; 32]) -> String {
    String::from_utf8_lossy(raw).replace('\0', "")
}

/// Connection to a deployed swap contract.
pub struct SwapContract {
    connection: ContractConnection,
}

impl SwapContract {
    pub async fn connect(config: &ContractConfig) -> Result<Self> {
        Ok(Self { connection: ContractConnection::connect(config).await? })
    }

    pub async fn connect_with_signer(
        config: &ContractConfig,
        signer: PrivateKeySigner,
    ) -> Result<Self> {
        Ok(Self {
            connection: ContractConnection::connect_with_signer(config, signer).await?,
        })
    }

    /// The EIP-712 domain bids for this deployment are signed under.
    pub fn domain(&self) -> Domain {
        bid_domain(self.connection.chain().id(), self.connection.address())
    }

    fn contract(&self) -> RibbonSwap::RibbonSwapInstance<alloy::providers::DynProvider> {
        RibbonSwap::new(self.connection.address(), self.connection.provider().clone())
    }

    /// Fetches an offer by ID. A zero seller means the slot was never
    /// written, so the offer does not exist.
    pub async fn get_offer_details(&self, offer_id: U256) -> Result<OfferDetails> {
        let offer = self
            .contract()
            .swapOffers(offer_id)
            .call()
            .await
            .map_err(SdkError::rpc)?;

        if offer.seller == Address::ZERO {
            return Err(SdkError::UnknownOffer(offer_id.to_string()));
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

    /// Runs the contract's own `check` over a signed bid and returns its
    /// diagnostics verbatim.
    pub async fn validate_bid(&self, bid: &BidParams, signature: &str) -> Result<BidValidation> {
        let (r, s, v) = split_evm_signature(signature)?;

        let signed = RibbonSwap::SignedBid {
            swapId: bid.swap_id,
            nonce: U256::from(bid.nonce),
            signerWallet: parse_address(&bid.signer_wallet)?,
            sellAmount: bid.sell_amount,
            buyAmount: bid.buy_amount,
            referrer: parse_address(&bid.referrer)?,
            v,
            r,
            s,
        };

        let outcome = self
            .contract()
            .check(signed)
            .call()
            .await
            .map_err(SdkError::rpc)?;

        let errors = outcome.errCount.to::<usize>();
        if errors == 0 {
            return Ok(BidValidation::valid());
        }
        Ok(BidValidation::invalid(
            outcome.messages[..errors.min(outcome.messages.len())]
                .iter()
                .map(|msg| decode_check_message(msg))
                .collect(),
        ))
    }

    /// Posts a new offer and returns the swap ID assigned by the contract,
    /// read back from the `NewOffer` event.
    pub async fn create_offer(
        &self,
        offer_token: &str,
        bidding_token: &str,
        min_price: U256,
        min_bid_size: U256,
        offer_amount: U256,
    ) -> Result<U256> {
        let receipt = self
            .contract()
            .createOffer(
                parse_address(offer_token)?,
                parse_address(bidding_token)?,
                to_u96(min_price, "min price")?,
                to_u96(min_bid_size, "min bid size")?,
                to_u128(offer_amount, "offer amount")?,
            )
            .gas(CREATE_OFFER_GAS)
            .send()
            .await
            .map_err(SdkError::rpc)?
            .get_receipt()
            .await
            .map_err(SdkError::rpc)?;

        if !receipt.status() {
            return Err(SdkError::Reverted(receipt.transaction_hash.to_string()));
        }

        let swap_id = receipt
            .logs()
            .iter()
            .find_map(|log| log.log_decode::<NewOffer>().ok())
            .map(|log| log.inner.data.swapId)
            .ok_or_else(|| {
                SdkError::Reverted(format!(
                    "no NewOffer event in {}",
                    receipt.transaction_hash
                ))
            })?;
        tracing::info!(%swap_id, tx = %receipt.transaction_hash, "offer created");

        Ok(swap_id)
    }
}

pub use RibbonSwap::NewOffer;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_messages_are_nul_trimmed() {
        let mut raw = [0u8; 32];
        raw[..20].copy_from_slice(b"SIGNATURE_MISMATCHED");
        assert_eq!(decode_check_message(&raw), "SIGNATURE_MISMATCHED");
        assert_eq!(decode_check_message(&[0u8; 32]), "");
    }

    #[test]
    fn narrowing_is_checked() {
        assert!(to_u96(U256::from(1u64) << 96, "x").is_err());
        assert!(to_u96(U256::from(1u64) << 95, "x").is_ok());
        assert!(to_u128(U256::MAX, "x").is_err());
        assert_eq!(to_u128(U256::from(7u64), "x").unwrap(), 7);
    }
}
