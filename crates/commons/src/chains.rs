use std::{fmt::Display, str::FromStr};

use crate::error::SdkError;

/// Chains the aggregator can route auctions to.
///
/// IDs for EVM chains are the canonical chain IDs; the Solana entries use
/// aggregator-assigned sentinels since Solana has no chain-ID concept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Chain {
    Ethereum,
    Ropsten,
    Kovan,
    Matic,
    Fuji,
    Avalanche,
    SolanaDev,
    SolanaMain,
}

impl Chain {
    pub const ALL: [Chain; 8] = [
        Chain::Ethereum,
        Chain::Ropsten,
        Chain::Kovan,
        Chain::Matic,
        Chain::Fuji,
        Chain::Avalanche,
        Chain::SolanaDev,
        Chain::SolanaMain,
    ];

    pub fn id(&self) -> u64 {
        match self {
            Chain::Ethereum => 1,
            Chain::Ropsten => 3,
            Chain::Kovan => 42,
            Chain::Matic => 137,
            Chain::Fuji => 43113,
            Chain::Avalanche => 43114,
            Chain::SolanaDev => 777777,
            Chain::SolanaMain => 888888,
        }
    }

    pub fn from_id(id: u64) -> Result<Self, SdkError> {
        Chain::ALL
            .into_iter()
            .find(|chain| chain.id() == id)
            .ok_or(SdkError::UnsupportedChain(id))
    }

    pub fn is_solana(&self) -> bool { matches!(self, Chain::SolanaDev | Chain::SolanaMain) }

    pub fn is_evm(&self) -> bool { !self.is_solana() }
}

impl TryFrom<u64> for Chain {
    type Error = SdkError;

    fn try_from(id: u64) -> Result<Self, Self::Error> { Chain::from_id(id) }
}

impl Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Chain::Ethereum => write!(f, "ethereum"),
            Chain::Ropsten => write!(f, "ropsten"),
            Chain::Kovan => write!(f, "kovan"),
            Chain::Matic => write!(f, "matic"),
            Chain::Fuji => write!(f, "fuji"),
            Chain::Avalanche => write!(f, "avalanche"),
            Chain::SolanaDev => write!(f, "solana-dev"),
            Chain::SolanaMain => write!(f, "solana-main"),
        }
    }
}

impl FromStr for Chain {
    type Err = SdkError;

    /// Accepts either a chain name (as rendered by [`Display`]) or a raw ID.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(id) = u64::from_str(s) {
            return Chain::from_id(id);
        }
        Chain::ALL
            .into_iter()
            .find(|chain| chain.to_string() == s.to_lowercase())
            .ok_or_else(|| SdkError::InvalidArgument(format!("unknown chain: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip() {
        for chain in Chain::ALL {
            assert_eq!(Chain::from_id(chain.id()).unwrap(), chain);
        }
    }

    #[test]
    fn unknown_id_is_rejected() {
        assert!(matches!(Chain::from_id(5), Err(SdkError::UnsupportedChain(5))));
    }

    #[test]
    fn parses_names_and_ids() {
        assert_eq!("ethereum".parse::<Chain>().unwrap(), Chain::Ethereum);
        assert_eq!("43114".parse::<Chain>().unwrap(), Chain::Avalanche);
        assert_eq!("solana-main".parse::<Chain>().unwrap(), Chain::SolanaMain);
        assert!("goerli".parse::<Chain>().is_err());
    }

    #[test]
    fn chain_families() {
        assert!(Chain::Ethereum.is_evm());
        assert!(Chain::Matic.is_evm());
        assert!(Chain::SolanaDev.is_solana());
        assert!(!Chain::SolanaMain.is_evm());
    }
}
