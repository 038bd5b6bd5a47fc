//! Anchor account layouts of the swap and options programs.
//!
//! Accounts are prefixed with an 8-byte discriminator,
//! `sha256("account:<Name>")[..8]`, followed by the borsh-encoded fields.

use borsh::{BorshDeserialize, BorshSerialize};
use sha2::{Digest, Sha256};
use solana_sdk::pubkey::Pubkey;

use sdk_commons::{SdkError, error::Result};

pub const DISCRIMINATOR_LEN: usize = 8;

/// Discriminator for an Anchor account type name.
pub fn account_discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let digest = Sha256::digest(format!("account:{name}").as_bytes());
    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    out
}

fn decode_account<T: BorshDeserialize>(name: &str, data: &[u8]) -> Result<T> {
    if data.len() < DISCRIMINATOR_LEN || data[..DISCRIMINATOR_LEN] != account_discriminator(name) {
        return Err(SdkError::InvalidArgument(format!(
            "account data does not hold a {name}"
        )));
    }
    T::try_from_slice(&data[DISCRIMINATOR_LEN..])
        .map_err(|err| SdkError::InvalidArgument(format!("malformed {name}: {err}")))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub enum OrderStatus {
    Created,
    Canceled,
    Filled,
    Disabled,
}

/// One side of a swap: what the creator gives, what it wants back, and who
/// may take the other side.
#[derive(Clone, Debug, PartialEq, BorshDeserialize, BorshSerialize)]
pub struct SwapOrder {
    pub creator: Pubkey,
    pub price: f64,
    pub expiry: u64,
    pub give_size: u64,
    pub give_mint: Pubkey,
    pub give_pool: Pubkey,
    pub receive_size: u64,
    pub receive_mint: Pubkey,
    pub receive_pool: Pubkey,
    pub is_counterparty_provided: bool,
    pub counterparty: Pubkey,
    pub is_whitelisted: bool,
    pub whitelist_token_mint: Pubkey,
    pub is_disabled: bool,
    pub status: OrderStatus,
    pub order_id: u64,
    pub options_contract: Pubkey,
    pub bump: u8,
}

impl SwapOrder {
    pub const NAME: &'static str = "SwapOrder";

    pub fn decode(data: &[u8]) -> Result<Self> {
        decode_account(Self::NAME, data)
    }
}

/// Per-user order counter; the next order gets `curr_order_id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub struct UserOrders {
    pub user: Pubkey,
    pub curr_order_id: u64,
}

impl UserOrders {
    pub const NAME: &'static str = "UserOrders";

    pub fn decode(data: &[u8]) -> Result<Self> {
        decode_account(Self::NAME, data)
    }
}

/// The Inertia options contract a swap order settles against.
#[derive(Clone, Debug, PartialEq, BorshDeserialize, BorshSerialize)]
pub struct OptionsContract {
    pub admin_key: Pubkey,
    pub oracle_ai: Pubkey,
    pub underlying_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub expiry_ts: u64,
    pub is_call: u64,
    pub contract_bump: u8,
    pub writer_bump: u8,
    pub underlying_pool_bump: u8,
    pub claimable_pool_bump: u8,
    pub option_bump: u8,
    pub underlying_amount: u64,
    pub quote_amount: u64,
    pub writer_mint: Pubkey,
    pub option_mint: Pubkey,
    pub underlying_pool: Pubkey,
    pub claimable_pool: Pubkey,
    pub mint_fee_account: Pubkey,
    pub exercise_fee_account: Pubkey,
    pub was_settle_cranked: bool,
    pub extra_key1: Pubkey,
    pub exercise_amount: u64,
    pub total_amount: u64,
}

impl OptionsContract {
    pub const NAME: &'static str = "OptionsContract";

    pub fn decode(data: &[u8]) -> Result<Self> {
        decode_account(Self::NAME, data)
    }

    pub fn is_call(&self) -> bool {
        self.is_call != 0
    }
}

#[cfg(test)]
mod tests {
    use borsh::BorshSerialize;

    use super::*;

    #[test]
    fn discriminators_match_program_idl() {
        assert_eq!(
            account_discriminator(SwapOrder::NAME),
            [0x78, 0x00, 0xe4, 0x50, 0xa7, 0xf8, 0x49, 0xc9]
        );
        assert_eq!(
            account_discriminator(UserOrders::NAME),
            [0x20, 0x43, 0x62, 0x53, 0x2e, 0x05, 0x06, 0x91]
        );
        assert_eq!(
            account_discriminator(OptionsContract::NAME),
            [0x23, 0xa8, 0x5a, 0x78, 0x88, 0x4f, 0x25, 0x73]
        );
    }

    #[test]
    fn swap_order_round_trips() {
        let order = SwapOrder {
            creator: Pubkey::new_unique(),
            price: 1.5,
            expiry: 1_700_000_000,
            give_size: 100,
            give_mint: Pubkey::new_unique(),
            give_pool: Pubkey::new_unique(),
            receive_size: 600,
            receive_mint: Pubkey::new_unique(),
            receive_pool: Pubkey::new_unique(),
            is_counterparty_provided: true,
            counterparty: Pubkey::new_unique(),
            is_whitelisted: false,
            whitelist_token_mint: Pubkey::new_unique(),
            is_disabled: false,
            status: OrderStatus::Created,
            order_id: 3,
            options_contract: Pubkey::new_unique(),
            bump: 254,
        };

        let mut data = account_discriminator(SwapOrder::NAME).to_vec();
        order.serialize(&mut data).unwrap();
        assert_eq!(SwapOrder::decode(&data).unwrap(), order);
    }

    #[test]
    fn wrong_discriminator_is_rejected() {
        let user_orders = UserOrders { user: Pubkey::new_unique(), curr_order_id: 1 };
        let mut data = account_discriminator("SomethingElse").to_vec();
        user_orders.serialize(&mut data).unwrap();
        assert!(UserOrders::decode(&data).is_err());
    }

    #[test]
    fn user_orders_round_trips() {
        let user_orders = UserOrders { user: Pubkey::new_unique(), curr_order_id: 42 };
        let mut data = account_discriminator(UserOrders::NAME).to_vec();
        user_orders.serialize(&mut data).unwrap();
        assert_eq!(UserOrders::decode(&data).unwrap(), user_orders);
    }
}
