//! The Opyn RFQ settlement contract.
//!
//! Offers follow the same Airswap-style layout as Ribbon's swap; settlement
//! itself happens through `settleRfq`, which takes the maker and taker
//! `OrderData` with their EIP-712 signatures attached.

use alloy::{
    primitives::{Address, B256, U256, aliases::U96},
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

use crate::definitions::{Message, message_domain};

sol! {
    #[sol(rpc)]
    contract OpynSettlement {
        struct OrderData {
            uint256 bidId;
            uint256 amount;
            address trader;
            address token;
            uint8 v;
            bytes32 r;
            bytes32 s;
        }

        event NewOffer(
            uint256 swapId,
            address seller,
            address offerToken,
            address bidToken,
            uint256 minPrice,
            uint256 minBidSize,
            uint256 totalSize
        );

        function createOffer(
            address offerToken,
            address bidToken,
            uint96 minPrice,
            uint96 minBidSize,
            uint128 totalSize
        ) external returns (uint256 swapId);

        function swapOffers(uint256 swapId) external view returns (
            address seller,
            address offerToken,
            uint96 minPrice,
            address bidToken,
            uint96 minBidSize,
            uint128 totalSize,
            uint128 availableSize
        );

        function settleRfq(OrderData calldata offerOrder, OrderData calldata bidOrder) external;

        function nonces(address owner) external view returns (uint256);

        function DOMAIN_SEPARATOR() external view returns (bytes32);
    }
}

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

/// Connection to a deployed settlement contract.
pub struct SettlementContract {
    connection: ContractConnection,
}

impl SettlementContract {
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

    pub fn domain(&self) -> Domain {
        message_domain(self.connection.chain().id(), self.connection.address())
    }

    fn contract(&self) -> OpynSettlement::OpynSettlementInstance<alloy::providers::DynProvider> {
        OpynSettlement::new(self.connection.address(), self.connection.provider().clone())
    }

    /// The trader's current nonce. Signed into every [`Message`]; bumped by
    /// the contract on settlement.
    pub async fn nonces(&self, owner: Address) -> Result<U256> {
        self.contract().nonces(owner).call().await.map_err(SdkError::rpc)
    }

    /// The separator the deployed contract actually signs under.
    pub async fn domain_separator(&self) -> Result<B256> {
        self.contract()
            .DOMAIN_SEPARATOR()
            .call()
            .await
            .map_err(SdkError::rpc)
    }

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
            offer_token: offer.offerToken.to_string(),
            bidding_token: offer.bidToken.to_string(),
            min_price: U256::from(offer.minPrice),
            min_bid_size: U256::from(offer.minBidSize),
            total_size: U256::from(offer.totalSize),
            available_size: U256::from(offer.availableSize),
        })
    }

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
            .send()
            .await
            .map_err(SdkError::rpc)?
            .get_receipt()
            .await
            .map_err(SdkError::rpc)?;

        if !receipt.status() {
            return Err(SdkError::Reverted(receipt.transaction_hash.to_string()));
        }

        receipt
            .logs()
            .iter()
            .find_map(|log| log.log_decode::<OpynSettlement::NewOffer>().ok())
            .map(|log| log.inner.data.swapId)
            .ok_or_else(|| {
                SdkError::Reverted(format!(
                    "no NewOffer event in {}",
                    receipt.transaction_hash
                ))
            })
    }

    /// Settles an RFQ with both signed orders. The connection must carry a
    /// signer.
    pub async fn settle_rfq(
        &self,
        offer_order: OpynSettlement::OrderData,
        bid_order: OpynSettlement::OrderData,
    ) -> Result<()> {
        let receipt = self
            .contract()
            .settleRfq(offer_order, bid_order)
            .send()
            .await
            .map_err(SdkError::rpc)?
            .get_receipt()
            .await
            .map_err(SdkError::rpc)?;

        if !receipt.status() {
            return Err(SdkError::Reverted(receipt.transaction_hash.to_string()));
        }
        tracing::info!(tx = %receipt.transaction_hash, "rfq settled");
        Ok(())
    }

    /// Validates a signed bid without submitting it. The checks mirror what
    /// `settleRfq` would enforce: the signature must be under this
    /// deployment's domain, recover to the stated signer and carry the
    /// trader's current nonce.
    pub async fn validate_bid(&self, bid: &BidParams, signature: &str) -> Result<BidValidation> {
        let mut validation = BidValidation::valid();

        let (r, s, v) = split_evm_signature(signature)?;
        let signer_wallet = parse_address(&bid.signer_wallet)?;

        let domain = self.domain();
        let on_chain = self.domain_separator().await?;
        if domain.separator() != on_chain {
            validation.push("domain separator does not match the settlement contract");
        }

        let current_nonce = self.nonces(signer_wallet).await?;
        if current_nonce != U256::from(bid.nonce) {
            validation.push("nonce is not the trader's current nonce");
        }

        let offer = self.get_offer_details(bid.swap_id).await?;
        let message = Message {
            bidId: bid.swap_id,
            trader: signer_wallet,
            token: parse_address(&offer.bidding_token)?,
            amount: bid.sell_amount,
            nonces: U256::from(bid.nonce),
        };

        let signature = alloy::primitives::Signature::from_scalars_and_parity(r, s, v >= 28);
        match signature.recover_address_from_prehash(&domain.signing_hash(&message)) {
            Ok(recovered) if recovered == signer_wallet => {},
            Ok(_) | Err(_) => validation.push("signature does not recover to the signer wallet"),
        }

        Ok(validation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_narrowing_is_checked() {
        assert!(to_u96(U256::MAX, "x").is_err());
        assert!(to_u128(U256::from(u128::MAX), "x").is_ok());
    }
}
