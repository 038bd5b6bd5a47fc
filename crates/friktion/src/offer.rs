//! The offer view over a swap order.

use solana_sdk::pubkey::Pubkey;

use crate::accounts::SwapOrder;

/// A swap order flattened to the aggregator's offer shape. Option tokens are
/// minted with zero decimals, so sizes are plain counts; the contract
/// carries no minimum price and a bid must take the whole give side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Offer {
    pub seller: Pubkey,
    pub offer_token: Pubkey,
    pub bidding_token: Pubkey,
    pub expiry: u64,
    pub offer_amount: u64,
    pub min_price: u64,
    pub min_bid_size: u64,
    pub swap_order_address: Pubkey,
}

impl Offer {
    pub fn from_swap_order(swap_order: &SwapOrder, address: Pubkey) -> Self {
        Self {
            seller: swap_order.creator,
            offer_token: swap_order.give_mint,
            bidding_token: swap_order.receive_mint,
            expiry: swap_order.expiry,
            offer_amount: swap_order.give_size,
            min_price: 0,
            min_bid_size: swap_order.give_size,
            swap_order_address: address,
        }
    }
}
