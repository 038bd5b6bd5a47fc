//! Client for the swap program.

use fastnum::{UD256, udec256};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    account::Account,
    commitment_config::CommitmentConfig,
    program_option::COption,
    program_pack::Pack,
    pubkey,
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    transaction::Transaction,
};
use spl_associated_token_account::get_associated_token_address;

use sdk_commons::{
    SdkError,
    config::{BidValidation, OfferTokenDetails},
    error::Result,
};

use crate::{
    accounts::{OptionsContract, SwapOrder, UserOrders},
    bid::BidDetails,
    instruction::{self, CreateAccounts, CreateArgs},
    network::Network,
    offer::Offer,
    pda::{OPTIONS_PROGRAM_ID, SWAP_PROGRAM_ID, SwapOrderAddresses, delegate_authority_address},
};

pub const GLOBAL_FRIKTION_AUTHORITY: Pubkey =
    pubkey!("7wYqGsQmfVigMSratssoPddfLU1P5srZcM32nvKAgWkj");
pub const GLOBAL_FRIKTION_ADMIN: Pubkey =
    pubkey!("DxMJgeSVoe1cWo1NPExiAsmn83N3bADvkT86dSP1k7WE");

/// Mainnet auction bid token.
pub const MAINNET_USDC_MINT: Pubkey = pubkey!("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v");

/// Minimum delegated amount for a counterparty token account to count as
/// funded.
pub const MIN_REQUIRED_ALLOWANCE: u64 = 100;

/// Everything `create` needs beyond what the PDAs provide.
#[derive(Clone, Copy, Debug)]
pub struct SwapOrderTemplate {
    pub give_size: u64,
    pub receive_size: u64,
    pub expiry: u64,
    pub give_mint: Pubkey,
    pub receive_mint: Pubkey,
    pub creator_give_pool: Pubkey,
    pub counterparty: Pubkey,
    pub is_counterparty_provided: bool,
    pub is_whitelisted: bool,
    pub whitelist_token_mint: Pubkey,
    pub options_contract: Pubkey,
}

/// Strike price from the options contract amounts, normalized by each
/// mint's decimals.
pub fn strike_price(
    contract: &OptionsContract,
    underlying_decimals: u8,
    quote_decimals: u8,
) -> Result<UD256> {
    if contract.underlying_amount == 0 || contract.quote_amount == 0 {
        return Err(SdkError::InvalidArgument(
            "options contract has zero collateral amounts".to_string(),
        ));
    }

    let factor = |decimals: u8| {
        let mut scale = udec256!(1);
        for _ in 0..decimals {
            scale *= udec256!(10);
        }
        scale
    };
    let underlying_factor = factor(underlying_decimals);
    let quote_factor = factor(quote_decimals);
    let underlying_amount = UD256::from(contract.underlying_amount);
    let quote_amount = UD256::from(contract.quote_amount);

    Ok(if contract.is_call() {
        (underlying_factor / quote_factor) * quote_amount / underlying_amount
    } else {
        (quote_factor / underlying_factor) * underlying_amount / quote_amount
    })
}

/// Client bound to one cluster.
pub struct SwapContract {
    network: Network,
    client: RpcClient,
}

impl SwapContract {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            client: RpcClient::new(network.rpc_url().to_string()),
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    async fn program_account(&self, program: &Pubkey, address: &Pubkey) -> Result<Account> {
        let account = self
            .client
            .get_account(address)
            .await
            .map_err(|_| SdkError::UnknownAccount(address.to_string()))?;
        if account.owner != *program {
            return Err(SdkError::UnknownAccount(format!(
                "{address} is not owned by {program}"
            )));
        }
        Ok(account)
    }

    pub async fn get_swap_order_for_key(&self, key: &Pubkey) -> Result<SwapOrder> {
        let account = self.program_account(&SWAP_PROGRAM_ID, key).await?;
        SwapOrder::decode(&account.data)
    }

    pub async fn get_swap_order(&self, user: &Pubkey, order_id: u64) -> Result<SwapOrder> {
        let pdas = SwapOrderAddresses::for_order(user, order_id);
        self.get_swap_order_for_key(&pdas.swap_order).await
    }

    pub async fn get_options_contract(&self, key: &Pubkey) -> Result<OptionsContract> {
        let account = self.program_account(&OPTIONS_PROGRAM_ID, key).await?;
        OptionsContract::decode(&account.data)
    }

    /// The creator's next order ID, from its `UserOrders` counter. A missing
    /// counter means no orders were ever created.
    pub async fn next_order_id(&self, user: &Pubkey) -> Result<u64> {
        let (address, _) = crate::pda::find_user_orders_address(user);
        let response = self
            .client
            .get_account_with_commitment(&address, CommitmentConfig::confirmed())
            .await
            .map_err(SdkError::rpc)?;
        match response.value {
            Some(account) => Ok(UserOrders::decode(&account.data)?.curr_order_id),
            None => Ok(0),
        }
    }

    async fn token_account(&self, address: &Pubkey) -> Result<spl_token::state::Account> {
        let account = self.program_account(&spl_token::ID, address).await?;
        spl_token::state::Account::unpack(&account.data)
            .map_err(|err| SdkError::InvalidArgument(format!("token account {address}: {err}")))
    }

    async fn mint_decimals(&self, mint: &Pubkey) -> Result<u8> {
        let account = self.program_account(&spl_token::ID, mint).await?;
        let mint_state = spl_token::state::Mint::unpack(&account.data)
            .map_err(|err| SdkError::InvalidArgument(format!("mint {mint}: {err}")))?;
        Ok(mint_state.decimals)
    }

    pub async fn get_offer(&self, user: &Pubkey, order_id: u64) -> Result<Offer> {
        let pdas = SwapOrderAddresses::for_order(user, order_id);
        let order = self.get_swap_order_for_key(&pdas.swap_order).await?;
        Ok(Offer::from_swap_order(&order, pdas.swap_order))
    }

    pub async fn get_offered_token_details(
        &self,
        user: &Pubkey,
        order_id: u64,
    ) -> Result<OfferTokenDetails> {
        let order = self.get_swap_order(user, order_id).await?;
        let contract = self.get_options_contract(&order.options_contract).await?;
        let underlying_decimals = self.mint_decimals(&contract.underlying_mint).await?;
        let quote_decimals = self.mint_decimals(&contract.quote_mint).await?;

        Ok(OfferTokenDetails {
            collateral_asset: contract.underlying_mint.to_string(),
            underlying_asset: contract.underlying_mint.to_string(),
            strike_asset: contract.quote_mint.to_string(),
            strike_price: strike_price(&contract, underlying_decimals, quote_decimals)?,
            expiry_timestamp: contract.expiry_ts,
            is_put: !contract.is_call(),
        })
    }

    fn has_minimum_allowance(account: &spl_token::state::Account) -> bool {
        account.delegate == COption::Some(delegate_authority_address())
            && account.delegated_amount >= MIN_REQUIRED_ALLOWANCE
    }

    /// True when the wallet's associated token account for `mint` has the
    /// program's delegate authority approved with at least the minimum
    /// amount.
    pub async fn verify_allowance(&self, mint: &Pubkey, wallet: &Pubkey) -> Result<bool> {
        let address = get_associated_token_address(wallet, mint);
        let account = self.token_account(&address).await?;
        Ok(Self::has_minimum_allowance(&account))
    }

    /// Checks a bid the way the program will on execution. Returns the first
    /// rule the bid breaks.
    pub async fn validate_bid(&self, bid: &BidDetails, signature: &str) -> Result<BidValidation> {
        let offer = self.get_offer(&bid.swap_order_owner, bid.order_id).await?;

        if bid.bid_size < offer.min_bid_size {
            return Ok(BidValidation::invalid(vec![
                "bid size is below min bid size".to_string(),
            ]));
        }
        if bid.bid_size > offer.offer_amount {
            return Ok(BidValidation::invalid(vec![
                "bid size is greater than offer size".to_string(),
            ]));
        }
        if bid.bid_price < offer.min_price {
            return Ok(BidValidation::invalid(vec![
                "bid price is less than min price".to_string(),
            ]));
        }

        let bidding_account =
            get_associated_token_address(&bid.signer_wallet, &offer.bidding_token);
        let account = self.token_account(&bidding_account).await?;
        if !Self::has_minimum_allowance(&account) {
            return Ok(BidValidation::invalid(vec![
                "counterparty receive pool does not have sufficient allowance".to_string(),
            ]));
        }

        let transfer_amount = bid.bid_size.saturating_mul(bid.bid_price);
        if account.delegated_amount < transfer_amount {
            return Ok(BidValidation::invalid(vec![
                "allowance is below required threshold".to_string(),
            ]));
        }
        if account.amount < transfer_amount {
            return Ok(BidValidation::invalid(vec![
                "amount in token account is below required threshold".to_string(),
            ]));
        }

        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0);
        if offer.expiry < now {
            return Ok(BidValidation::invalid(vec![
                "expiry was in the past".to_string(),
            ]));
        }

        if !bid.verify(signature)? {
            return Ok(BidValidation::invalid(vec![
                "signature is invalid".to_string(),
            ]));
        }

        Ok(BidValidation::valid())
    }

    /// Creates a swap order and returns it with its address. The order ID is
    /// taken from the creator's `UserOrders` counter.
    pub async fn create_offer(
        &self,
        keypair: &Keypair,
        template: SwapOrderTemplate,
    ) -> Result<(SwapOrder, Pubkey)> {
        let creator = keypair.pubkey();
        let order_id = self.next_order_id(&creator).await?;
        let pdas = SwapOrderAddresses::for_order(&creator, order_id);

        let ix = instruction::create(
            CreateArgs {
                give_size: template.give_size,
                receive_size: template.receive_size,
                expiry: template.expiry,
                is_counterparty_provided: template.is_counterparty_provided,
                is_whitelisted: template.is_whitelisted,
                enforce_mint_match: false,
            },
            CreateAccounts {
                payer: creator,
                authority: creator,
                admin: GLOBAL_FRIKTION_ADMIN,
                user_orders: pdas.user_orders,
                swap_order: pdas.swap_order,
                give_pool: pdas.give_pool,
                give_mint: template.give_mint,
                receive_pool: pdas.receive_pool,
                receive_mint: template.receive_mint,
                creator_give_pool: template.creator_give_pool,
                counterparty: template.counterparty,
                whitelist_token_mint: template.whitelist_token_mint,
                options_contract: template.options_contract,
            },
        )?;

        let blockhash = self
            .client
            .get_latest_blockhash()
            .await
            .map_err(SdkError::rpc)?;
        let tx =
            Transaction::new_signed_with_payer(&[ix], Some(&creator), &[keypair], blockhash);
        let signature = self
            .client
            .send_and_confirm_transaction(&tx)
            .await
            .map_err(SdkError::rpc)?;
        tracing::info!(%signature, order_id, swap_order = %pdas.swap_order, "swap order created");

        let order = self.get_swap_order_for_key(&pdas.swap_order).await?;
        Ok((order, pdas.swap_order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(is_call: u64, underlying_amount: u64, quote_amount: u64) -> OptionsContract {
        OptionsContract {
            admin_key: Pubkey::new_unique(),
            oracle_ai: Pubkey::new_unique(),
            underlying_mint: Pubkey::new_unique(),
            quote_mint: Pubkey::new_unique(),
            expiry_ts: 1_700_000_000,
            is_call,
            contract_bump: 0,
            writer_bump: 0,
            underlying_pool_bump: 0,
            claimable_pool_bump: 0,
            option_bump: 0,
            underlying_amount,
            quote_amount,
            writer_mint: Pubkey::new_unique(),
            option_mint: Pubkey::new_unique(),
            underlying_pool: Pubkey::new_unique(),
            claimable_pool: Pubkey::new_unique(),
            mint_fee_account: Pubkey::new_unique(),
            exercise_fee_account: Pubkey::new_unique(),
            was_settle_cranked: false,
            extra_key1: Pubkey::new_unique(),
            exercise_amount: 0,
            total_amount: 0,
        }
    }

    #[test]
    fn call_strike_normalizes_by_decimals() {
        // 1 SOL (9 decimals) against 40 USDC (6 decimals) strikes at 40
        let call = contract(1, 1_000_000_000, 40_000_000);
        assert_eq!(strike_price(&call, 9, 6).unwrap(), udec256!(40));
    }

    #[test]
    fn put_strike_inverts_the_ratio() {
        let put = contract(0, 40_000_000, 1_000_000_000);
        assert_eq!(strike_price(&put, 6, 9).unwrap(), udec256!(40));
    }

    #[test]
    fn zero_amounts_are_rejected() {
        let broken = contract(1, 0, 1);
        assert!(strike_price(&broken, 9, 6).is_err());
    }

    #[test]
    fn allowance_requires_the_delegate_authority() {
        let mut account = spl_token::state::Account {
            mint: Pubkey::new_unique(),
            owner: Pubkey::new_unique(),
            amount: 1_000,
            delegate: COption::Some(delegate_authority_address()),
            state: spl_token::state::AccountState::Initialized,
            is_native: COption::None,
            delegated_amount: MIN_REQUIRED_ALLOWANCE,
            close_authority: COption::None,
        };
        assert!(SwapContract::has_minimum_allowance(&account));

        account.delegated_amount = MIN_REQUIRED_ALLOWANCE - 1;
        assert!(!SwapContract::has_minimum_allowance(&account));

        account.delegated_amount = MIN_REQUIRED_ALLOWANCE;
        account.delegate = COption::Some(Pubkey::new_unique());
        assert!(!SwapContract::has_minimum_allowance(&account));
    }
}
