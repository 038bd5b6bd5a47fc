//! Instruction builders for the swap program.
//!
//! Instruction data is the 8-byte Anchor method discriminator,
//! `sha256("global:<name>")[..8]`, followed by the borsh-encoded args.

use borsh::{BorshDeserialize, BorshSerialize};
use sha2::{Digest, Sha256};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    sysvar,
};
use solana_system_interface::program as system_program;

use sdk_commons::{SdkError, error::Result};

use crate::pda::SWAP_PROGRAM_ID;

pub fn instruction_discriminator(name: &str) -> [u8; 8] {
    let digest = Sha256::digest(format!("global:{name}").as_bytes());
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct CreateArgs {
    pub give_size: u64,
    pub receive_size: u64,
    pub expiry: u64,
    pub is_counterparty_provided: bool,
    pub is_whitelisted: bool,
    pub enforce_mint_match: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct CreateAccounts {
    pub payer: Pubkey,
    pub authority: Pubkey,
    pub admin: Pubkey,
    pub user_orders: Pubkey,
    pub swap_order: Pubkey,
    pub give_pool: Pubkey,
    pub give_mint: Pubkey,
    pub receive_pool: Pubkey,
    pub receive_mint: Pubkey,
    pub creator_give_pool: Pubkey,
    pub counterparty: Pubkey,
    pub whitelist_token_mint: Pubkey,
    pub options_contract: Pubkey,
}

/// Builds the `create` instruction that initializes a swap order and its
/// pools.
pub fn create(args: CreateArgs, accounts: CreateAccounts) -> Result<Instruction> {
    let metas = vec![
        AccountMeta::new(accounts.payer, false),
        AccountMeta::new_readonly(accounts.authority, true),
        AccountMeta::new_readonly(accounts.admin, false),
        AccountMeta::new(accounts.user_orders, false),
        AccountMeta::new(accounts.swap_order, false),
        AccountMeta::new(accounts.give_pool, false),
        AccountMeta::new_readonly(accounts.give_mint, false),
        AccountMeta::new(accounts.receive_pool, false),
        AccountMeta::new_readonly(accounts.receive_mint, false),
        AccountMeta::new(accounts.creator_give_pool, false),
        AccountMeta::new_readonly(accounts.counterparty, false),
        AccountMeta::new_readonly(accounts.whitelist_token_mint, false),
        AccountMeta::new_readonly(accounts.options_contract, false),
        AccountMeta::new_readonly(system_program::ID, false),
        AccountMeta::new_readonly(spl_token::ID, false),
        AccountMeta::new_readonly(sysvar::rent::ID, false),
    ];

    let mut data = instruction_discriminator("create").to_vec();
    borsh::to_writer(&mut data, &args)
        .map_err(|err| SdkError::InvalidArgument(format!("create args: {err}")))?;

    Ok(Instruction { program_id: SWAP_PROGRAM_ID, accounts: metas, data })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_discriminator_matches_program_idl() {
        assert_eq!(
            instruction_discriminator("create"),
            [0x18, 0x1e, 0xc8, 0x28, 0x05, 0x1c, 0x07, 0x77]
        );
    }

    #[test]
    fn create_instruction_layout() {
        let args = CreateArgs {
            give_size: 100,
            receive_size: 600,
            expiry: 1_700_000_000,
            is_counterparty_provided: true,
            is_whitelisted: false,
            enforce_mint_match: false,
        };
        let accounts = CreateAccounts {
            payer: Pubkey::new_unique(),
            authority: Pubkey::new_unique(),
            admin: Pubkey::new_unique(),
            user_orders: Pubkey::new_unique(),
            swap_order: Pubkey::new_unique(),
            give_pool: Pubkey::new_unique(),
            give_mint: Pubkey::new_unique(),
            receive_pool: Pubkey::new_unique(),
            receive_mint: Pubkey::new_unique(),
            creator_give_pool: Pubkey::new_unique(),
            counterparty: Pubkey::new_unique(),
            whitelist_token_mint: Pubkey::new_unique(),
            options_contract: Pubkey::new_unique(),
        };

        let ix = create(args, accounts).unwrap();
        assert_eq!(ix.program_id, SWAP_PROGRAM_ID);
        assert_eq!(ix.accounts.len(), 16);
        assert!(ix.accounts[1].is_signer);
        assert_eq!(ix.accounts[13].pubkey, system_program::ID);
        assert_eq!(ix.accounts[14].pubkey, spl_token::ID);

        assert_eq!(&ix.data[..8], &instruction_discriminator("create"));
        let decoded = CreateArgs::try_from_slice(&ix.data[8..]).unwrap();
        assert_eq!(decoded, args);
    }
}
