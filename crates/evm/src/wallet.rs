use std::str::FromStr;

use alloy::{
    primitives::{Address, B256, Signature},
    signers::{SignerSync, local::PrivateKeySigner},
};
use alloy_sol_types::SolStruct;
use fastnum::{UD256, udec256};
use sdk_commons::{SdkError, config::ContractConfig, error::Result};

use crate::{contract::parse_address, erc20::Erc20Contract, typed_data::Domain};

/// Minimum bidding-token allowance (in token units) a market maker must have
/// granted before its bids are considered fundable.
pub const MIN_ALLOWANCE: UD256 = udec256!(100000000);

/// A market maker wallet.
///
/// Holds at least an address; signing operations additionally require the
/// private key. When both key and address are supplied they must agree.
#[derive(Clone, derive_more::Debug)]
pub struct Wallet {
    address: Address,
    #[debug(skip)]
    signer: Option<PrivateKeySigner>,
}

impl Wallet {
    pub fn new(public_key: Option<&str>, private_key: Option<&str>) -> Result<Self> {
        match (public_key, private_key) {
            (_, Some(key)) => {
                let signer = PrivateKeySigner::from_str(key.trim_start_matches("0x"))
                    .map_err(|_| SdkError::InvalidArgument("invalid private key".to_string()))?;
                let address = signer.address();
                if let Some(public_key) = public_key
                    && parse_address(public_key)? != address
                {
                    return Err(SdkError::InvalidArgument(
                        "public key does not match private key".to_string(),
                    ));
                }
                Ok(Self { address, signer: Some(signer) })
            },
            (Some(public_key), None) => {
                Ok(Self { address: parse_address(public_key)?, signer: None })
            },
            (None, None) => Err(SdkError::InvalidArgument(
                "a wallet needs a public or a private key".to_string(),
            )),
        }
    }

    pub fn from_private_key(private_key: &str) -> Result<Self> {
        Self::new(None, Some(private_key))
    }

    pub fn from_address(public_key: &str) -> Result<Self> { Self::new(Some(public_key), None) }

    pub fn address(&self) -> Address { self.address }

    pub fn can_sign(&self) -> bool { self.signer.is_some() }

    /// The signer, for attaching to a transaction-sending provider.
    pub fn signer(&self) -> Result<PrivateKeySigner> {
        self.signer
            .clone()
            .ok_or_else(|| SdkError::InvalidArgument("wallet has no private key".to_string()))
    }

    pub fn sign_hash(&self, hash: B256) -> Result<Signature> {
        self.signer()?
            .sign_hash_sync(&hash)
            .map_err(|err| SdkError::InvalidSignature(err.to_string()))
    }

    /// Signs a typed struct under the venue domain.
    pub fn sign_typed<T: SolStruct>(&self, domain: &Domain, value: &T) -> Result<Signature> {
        self.sign_hash(domain.signing_hash(value))
    }

    /// Checks this wallet's bidding-token allowance towards the venue
    /// contract against [`MIN_ALLOWANCE`].
    pub async fn verify_allowance(
        &self,
        swap_config: &ContractConfig,
        token_address: &str,
    ) -> Result<bool> {
        let token_config = ContractConfig::new(
            token_address,
            swap_config.chain,
            swap_config.rpc_uri.clone(),
        );
        let token = Erc20Contract::connect(&token_config).await?;
        let spender = parse_address(&swap_config.address)?;
        let allowance = token.allowance_decimal(self.address, spender).await?;
        tracing::debug!(owner = %self.address, %spender, %allowance, "checked allowance");
        Ok(allowance > MIN_ALLOWANCE)
    }
}

/// Splits a signature into the legacy `(v, r, s)` triple, `v` being
/// `27 + parity` as EVM contracts expect.
pub fn signature_components(signature: &Signature) -> (u8, B256, B256) {
    (
        27 + signature.v() as u8,
        B256::from(signature.r()),
        B256::from(signature.s()),
    )
}

/// Renders a signature in the aggregator wire format (`r ‖ s ‖ v` hex).
pub fn signature_hex(signature: &Signature) -> String {
    hex::encode(signature.as_bytes())
}

#[cfg(test)]
mod tests {
    use alloy::sol;
    use sdk_commons::helpers::split_evm_signature;

    use super::*;

    sol! {
        struct Ping {
            uint256 value;
        }
    }

    fn wallet() -> Wallet {
        Wallet::from_private_key(&B256::repeat_byte(0x42).to_string()).unwrap()
    }

    #[test]
    fn requires_some_key() {
        assert!(Wallet::new(None, None).is_err());
    }

    #[test]
    fn address_only_wallet_cannot_sign() {
        let wallet = Wallet::from_address("0x0000000000000000000000000000000000000001").unwrap();
        assert!(!wallet.can_sign());
        assert!(wallet.sign_hash(B256::ZERO).is_err());
    }

    #[test]
    fn mismatched_keys_are_rejected() {
        let private_key = B256::repeat_byte(0x42).to_string();
        let wrong_address = "0x0000000000000000000000000000000000000001";
        assert!(Wallet::new(Some(wrong_address), Some(&private_key)).is_err());
    }

    #[test]
    fn signature_recovers_to_signer() {
        use alloy::primitives::{Address, U256};

        let wallet = wallet();
        let domain = Domain::new("TEST VENUE", "1", 1, Address::repeat_byte(0x11));
        let ping = Ping { value: U256::from(1u64) };

        let signature = wallet.sign_typed(&domain, &ping).unwrap();
        let recovered = signature
            .recover_address_from_prehash(&domain.signing_hash(&ping))
            .unwrap();
        assert_eq!(recovered, wallet.address());
    }

    #[test]
    fn wire_format_matches_components() {
        let wallet = wallet();
        let signature = wallet.sign_hash(B256::repeat_byte(0x33)).unwrap();

        let (v, r, s) = signature_components(&signature);
        let wire = signature_hex(&signature);
        assert_eq!(wire.len(), sdk_commons::helpers::EVM_SIGNATURE_LEN);

        let (wire_r, wire_s, wire_v) = split_evm_signature(&wire).unwrap();
        assert_eq!((wire_v, wire_r, wire_s), (v, r, s));
    }
}
