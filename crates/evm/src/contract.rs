use std::str::FromStr;

use alloy::{
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::client::RpcClient,
    signers::local::PrivateKeySigner,
    transports::layers::RetryBackoffLayer,
};
use sdk_commons::{
    Chain, SdkError,
    config::ContractConfig,
    error::Result,
};

/// Parses a 0x-prefixed EVM address.
pub fn parse_address(address: &str) -> Result<Address> {
    Address::from_str(address).map_err(|_| SdkError::InvalidAddress(address.to_string()))
}

/// An RPC provider bound to one deployed contract.
///
/// Connecting verifies that the RPC endpoint actually serves the configured
/// chain; a mismatched endpoint would otherwise produce signatures and calls
/// for the wrong domain.
#[derive(Clone, Debug)]
pub struct ContractConnection {
    chain: Chain,
    address: Address,
    provider: DynProvider,
}

impl ContractConnection {
    /// Connects read-only.
    pub async fn connect(config: &ContractConfig) -> Result<Self> {
        let client = Self::client(&config.rpc_uri).await?;
        let provider = ProviderBuilder::new().connect_client(client).erased();
        Self::bind(config, provider).await
    }

    /// Connects with a local signer attached, so calls can send transactions.
    pub async fn connect_with_signer(
        config: &ContractConfig,
        signer: PrivateKeySigner,
    ) -> Result<Self> {
        let client = Self::client(&config.rpc_uri).await?;
        let provider = ProviderBuilder::new()
            .wallet(signer)
            .connect_client(client)
            .erased();
        Self::bind(config, provider).await
    }

    async fn client(rpc_uri: &str) -> Result<RpcClient> {
        RpcClient::builder()
            .layer(RetryBackoffLayer::new(10, 100, 200))
            .connect(rpc_uri)
            .await
            .map_err(SdkError::rpc)
    }

    async fn bind(config: &ContractConfig, provider: DynProvider) -> Result<Self> {
        let address = parse_address(&config.address)?;

        let rpc_chain_id = provider.get_chain_id().await.map_err(SdkError::rpc)?;
        if rpc_chain_id != config.chain.id() {
            return Err(SdkError::ChainMismatch {
                expected: config.chain.id(),
                actual: rpc_chain_id,
            });
        }
        tracing::debug!(chain = %config.chain, address = %address, "connected to contract");

        Ok(Self { chain: config.chain, address, provider })
    }

    pub fn chain(&self) -> Chain { self.chain }

    pub fn address(&self) -> Address { self.address }

    pub fn provider(&self) -> &DynProvider { &self.provider }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_parsing() {
        assert!(parse_address("0x0000000000000000000000000000000000000000").is_ok());
        assert!(parse_address("0xEPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGG").is_err());
        assert!(matches!(
            parse_address("not-an-address"),
            Err(SdkError::InvalidAddress(_))
        ));
    }
}
