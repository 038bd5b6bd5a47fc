//! Bid messages.
//!
//! Bids are not typed data; the counterparty signs a fixed byte layout with
//! its ed25519 key and the signature travels as a base58 string.

use std::str::FromStr;

use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
};

use sdk_commons::{SdkError, error::Result};

use crate::pda::find_swap_order_address;

/// What a counterparty commits to when bidding on a swap order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BidDetails {
    pub swap_order_owner: Pubkey,
    pub order_id: u64,
    pub signer_wallet: Pubkey,
    pub bid_size: u64,
    pub bid_price: u64,
}

impl BidDetails {
    pub fn swap_order_address(&self) -> Pubkey {
        find_swap_order_address(&self.swap_order_owner, self.order_id).0
    }

    /// Byte layout the signature covers:
    /// `order_id le ‖ signer_wallet ‖ bid_size le ‖ bid_price le`.
    pub fn message(&self) -> Vec<u8> {
        let mut message = Vec::with_capacity(8 + 32 + 8 + 8);
        message.extend_from_slice(&self.order_id.to_le_bytes());
        message.extend_from_slice(self.signer_wallet.as_ref());
        message.extend_from_slice(&self.bid_size.to_le_bytes());
        message.extend_from_slice(&self.bid_price.to_le_bytes());
        message
    }

    /// Signs the bid message. The keypair must be the signer wallet.
    pub fn sign(&self, keypair: &Keypair) -> Result<Signature> {
        if keypair.pubkey() != self.signer_wallet {
            return Err(SdkError::InvalidArgument(
                "signer wallet does not match the signing key".to_string(),
            ));
        }
        Ok(keypair.sign_message(&self.message()))
    }

    pub fn verify(&self, signature: &str) -> Result<bool> {
        let signature = Signature::from_str(signature)
            .map_err(|_| SdkError::InvalidSignature(signature.to_string()))?;
        Ok(signature.verify(self.signer_wallet.as_ref(), &self.message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bid(signer: Pubkey) -> BidDetails {
        BidDetails {
            swap_order_owner: Pubkey::new_unique(),
            order_id: 3,
            signer_wallet: signer,
            bid_size: 100,
            bid_price: 6,
        }
    }

    #[test]
    fn message_layout() {
        let signer = Pubkey::new_unique();
        let message = bid(signer).message();
        assert_eq!(message.len(), 56);
        assert_eq!(&message[..8], &3u64.to_le_bytes());
        assert_eq!(&message[8..40], signer.as_ref());
        assert_eq!(&message[40..48], &100u64.to_le_bytes());
        assert_eq!(&message[48..56], &6u64.to_le_bytes());
    }

    #[test]
    fn sign_and_verify_round_trip() {
        let keypair = Keypair::new();
        let bid = bid(keypair.pubkey());

        let signature = bid.sign(&keypair).unwrap();
        assert!(bid.verify(&signature.to_string()).unwrap());

        let tampered = BidDetails { bid_price: 7, ..bid };
        assert!(!tampered.verify(&signature.to_string()).unwrap());
    }

    #[test]
    fn foreign_key_cannot_sign() {
        let keypair = Keypair::new();
        let bid = bid(Pubkey::new_unique());
        assert!(bid.sign(&keypair).is_err());
    }

    #[test]
    fn garbage_signature_is_rejected() {
        let bid = bid(Pubkey::new_unique());
        assert!(bid.verify("not-base58!").is_err());
    }
}
