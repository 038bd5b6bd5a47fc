//! EIP-712 domain handling.
//!
//! Struct hashing itself comes from [`alloy_sol_types::SolStruct`]; venues
//! declare their bid payloads with `sol!` and this module supplies the domain
//! side: `keccak256(0x1901 ‖ domainSeparator ‖ hashStruct(message))`.

use alloy::primitives::{Address, B256, U256};
use alloy_sol_types::{Eip712Domain, SolStruct};

/// Domain parameters for signatures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Domain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
    pub salt: Option<B256>,
}

impl Domain {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: u64,
        verifying_contract: Address,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id,
            verifying_contract,
            salt: None,
        }
    }

    fn eip712(&self) -> Eip712Domain {
        Eip712Domain::new(
            Some(self.name.clone().into()),
            Some(self.version.clone().into()),
            Some(U256::from(self.chain_id)),
            Some(self.verifying_contract),
            self.salt,
        )
    }

    /// The domain separator, as exposed by contracts via `DOMAIN_SEPARATOR()`.
    pub fn separator(&self) -> B256 { self.eip712().hash_struct() }

    /// Signing hash of a typed struct under this domain.
    pub fn signing_hash<T: SolStruct>(&self, value: &T) -> B256 {
        value.eip712_signing_hash(&self.eip712())
    }
}
