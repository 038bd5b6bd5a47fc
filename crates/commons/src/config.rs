use alloy::primitives::U256;
use fastnum::UD256;

use crate::{
    chains::Chain,
    error::{Result, SdkError},
};

/// Frontend pages where market makers authorize token spending for a venue.
#[derive(Clone, Copy, Debug)]
pub struct AuthorizationPages {
    pub mainnet: &'static str,
    pub testnet: &'static str,
}

/// Everything needed to reach a deployed venue contract.
#[derive(Clone, Debug)]
pub struct ContractConfig {
    pub address: String,
    pub chain: Chain,
    pub rpc_uri: String,
}

impl ContractConfig {
    pub fn new(address: impl Into<String>, chain: Chain, rpc_uri: impl Into<String>) -> Self {
        Self { address: address.into(), chain, rpc_uri: rpc_uri.into() }
    }
}

/// Parameters for posting a new offer.
///
/// `options_contract` and `counterparty` are consumed only by venues whose
/// offers reference an options program account (Solana); EVM venues ignore
/// them.
#[derive(Clone, Debug)]
pub struct CreateOfferParams {
    pub offer_token: String,
    pub bidding_token: String,
    pub min_price: U256,
    pub min_bid_size: U256,
    pub offer_amount: U256,
    pub public_key: String,
    pub private_key: String,
    pub options_contract: Option<String>,
    pub counterparty: Option<String>,
}

/// Identifies an offer. `seller` is required by venues that derive offer
/// accounts from their creator.
#[derive(Clone, Debug)]
pub struct OfferQuery {
    pub offer_id: U256,
    pub seller: Option<String>,
}

impl OfferQuery {
    pub fn by_id(offer_id: U256) -> Self { Self { offer_id, seller: None } }
}

/// The fields every venue signs over, venue-specific framing aside.
#[derive(Clone, Debug)]
pub struct BidParams {
    pub swap_id: U256,
    pub nonce: u64,
    pub signer_wallet: String,
    pub sell_amount: U256,
    pub buy_amount: U256,
    pub referrer: String,
}

#[derive(Clone, Debug)]
pub struct SignBidParams {
    pub bid: BidParams,
    pub public_key: String,
    pub private_key: String,
}

#[derive(Clone, Debug)]
pub struct SignedBidParams {
    pub bid: BidParams,
    pub seller: Option<String>,
    pub signature: String,
}

/// Details of the option token backing an offer.
#[derive(Clone, Debug, PartialEq)]
pub struct OfferTokenDetails {
    pub collateral_asset: String,
    pub underlying_asset: String,
    pub strike_asset: String,
    pub strike_price: UD256,
    pub expiry_timestamp: u64,
    pub is_put: bool,
}

/// Details of a live offer, in raw token units.
#[derive(Clone, Debug, PartialEq)]
pub struct OfferDetails {
    pub seller: String,
    pub offer_token: String,
    pub bidding_token: String,
    pub min_price: U256,
    pub min_bid_size: U256,
    pub total_size: U256,
    pub available_size: U256,
}

/// Outcome of bid validation. An empty error list means the bid would be
/// accepted by the venue contract as of the queried state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BidValidation {
    pub errors: Vec<String>,
}

impl BidValidation {
    pub fn valid() -> Self { Self::default() }

    pub fn invalid(errors: Vec<String>) -> Self { Self { errors } }

    pub fn is_valid(&self) -> bool { self.errors.is_empty() }

    pub fn push(&mut self, message: impl Into<String>) { self.errors.push(message.into()); }
}

/// The uniform venue interface.
///
/// Every method receives the full [`ContractConfig`]; venues are free to use
/// only the parts they need (Friktion, for one, resolves its RPC endpoint
/// from the chain rather than `rpc_uri`).
#[allow(async_fn_in_trait)]
pub trait SdkConfig {
    fn authorization_pages(&self) -> AuthorizationPages;

    fn supported_chains(&self) -> &'static [Chain];

    fn supports_chain(&self, chain: Chain) -> bool {
        self.supported_chains().contains(&chain)
    }

    /// Posts a new offer and returns its venue-assigned identifier.
    async fn create_offer(
        &self,
        config: &ContractConfig,
        params: &CreateOfferParams,
    ) -> Result<String>;

    /// Returns details about the token being offered.
    async fn get_offer_token_details(
        &self,
        config: &ContractConfig,
        query: &OfferQuery,
    ) -> Result<OfferTokenDetails>;

    /// Returns details for a given offer.
    async fn get_offer_details(
        &self,
        config: &ContractConfig,
        query: &OfferQuery,
    ) -> Result<OfferDetails>;

    /// Signs a bid and returns the wire-format signature.
    async fn sign_bid(&self, config: &ContractConfig, params: &SignBidParams) -> Result<String> {
        let _ = (config, params);
        Err(SdkError::Unsupported("sign_bid"))
    }

    /// Validates a signed bid against the venue's rules.
    async fn validate_bid(
        &self,
        config: &ContractConfig,
        bid: &SignedBidParams,
    ) -> Result<BidValidation>;

    /// Verifies that the venue contract is allowed to move the given token
    /// on the wallet's behalf.
    async fn verify_allowance(
        &self,
        config: &ContractConfig,
        public_key: &str,
        token_address: &str,
    ) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bid_validation_accumulates() {
        let mut validation = BidValidation::valid();
        assert!(validation.is_valid());
        validation.push("bid size is below min bid size");
        validation.push("expiry was in the past");
        assert!(!validation.is_valid());
        assert_eq!(validation.errors.len(), 2);
    }
}
