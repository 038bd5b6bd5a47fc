//! Solana cluster selection.
//!
//! Unlike the EVM venues the RPC endpoint is not caller-supplied; each
//! network has a fixed URL.

use sdk_commons::{Chain, SdkError, error::Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Network {
    Devnet,
    Testnet,
    Mainnet,
}

impl Network {
    pub fn rpc_url(&self) -> &'static str {
        match self {
            Network::Devnet => "https://api.devnet.solana.com",
            Network::Testnet => "https://api.testnet.solana.com",
            Network::Mainnet => "https://solana-api.projectserum.com",
        }
    }

    pub fn from_chain(chain: Chain) -> Result<Self> {
        match chain {
            Chain::SolanaDev => Ok(Network::Devnet),
            Chain::SolanaMain => Ok(Network::Mainnet),
            other => Err(SdkError::UnsupportedChain(other.id())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chains_map_to_clusters() {
        assert_eq!(Network::from_chain(Chain::SolanaDev).unwrap(), Network::Devnet);
        assert_eq!(Network::from_chain(Chain::SolanaMain).unwrap(), Network::Mainnet);
        assert!(Network::from_chain(Chain::Ethereum).is_err());
    }

    #[test]
    fn urls_are_https() {
        for network in [Network::Devnet, Network::Testnet, Network::Mainnet] {
            assert!(network.rpc_url().starts_with("https://"));
        }
    }
}
