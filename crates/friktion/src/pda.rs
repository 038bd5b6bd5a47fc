//! Program-derived addresses of the swap program.

use solana_sdk::{pubkey, pubkey::Pubkey};

// TODO: pin to the deployed program IDs before mainnet use.
pub const SWAP_PROGRAM_ID: Pubkey = pubkey!("2Qt5gy2bDh2GECqjbaBjhpfjKT3zKtiLkWChW4E1xrxT");
pub const OPTIONS_PROGRAM_ID: Pubkey = pubkey!("7nB2BRvXdta2YSgGaLEoper9b3AVkUNv9C4QK2QdiosC");

pub fn find_swap_order_address(user: &Pubkey, order_id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[b"swapOrder", user.as_ref(), &order_id.to_le_bytes()],
        &SWAP_PROGRAM_ID,
    )
}

pub fn find_user_orders_address(user: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[b"userOrders", user.as_ref()], &SWAP_PROGRAM_ID)
}

pub fn find_give_pool_address(swap_order: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[b"givePool", swap_order.as_ref()], &SWAP_PROGRAM_ID)
}

pub fn find_receive_pool_address(swap_order: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[b"receivePool", swap_order.as_ref()], &SWAP_PROGRAM_ID)
}

/// One delegate authority serves every swap; token accounts approve it
/// rather than a per-order PDA.
pub fn delegate_authority_address() -> Pubkey {
    Pubkey::find_program_address(&[b"delegateAuthority"], &SWAP_PROGRAM_ID).0
}

/// Every account the `create` instruction touches, derived from the creator
/// and order ID.
#[derive(Clone, Copy, Debug)]
pub struct SwapOrderAddresses {
    pub user_orders: Pubkey,
    pub swap_order: Pubkey,
    pub give_pool: Pubkey,
    pub receive_pool: Pubkey,
    pub delegate_authority: Pubkey,
}

impl SwapOrderAddresses {
    pub fn for_order(user: &Pubkey, order_id: u64) -> Self {
        let (swap_order, _) = find_swap_order_address(user, order_id);
        Self {
            user_orders: find_user_orders_address(user).0,
            swap_order,
            give_pool: find_give_pool_address(&swap_order).0,
            receive_pool: find_receive_pool_address(&swap_order).0,
            delegate_authority: delegate_authority_address(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivations_are_deterministic() {
        let user = Pubkey::new_unique();
        let (a, bump_a) = find_swap_order_address(&user, 7);
        let (b, bump_b) = find_swap_order_address(&user, 7);
        assert_eq!((a, bump_a), (b, bump_b));

        let (c, _) = find_swap_order_address(&user, 8);
        assert_ne!(a, c);
    }

    #[test]
    fn addresses_follow_the_swap_order() {
        let user = Pubkey::new_unique();
        let pdas = SwapOrderAddresses::for_order(&user, 0);
        assert_eq!(pdas.swap_order, find_swap_order_address(&user, 0).0);
        assert_eq!(pdas.give_pool, find_give_pool_address(&pdas.swap_order).0);
        assert_eq!(pdas.receive_pool, find_receive_pool_address(&pdas.swap_order).0);
        assert_eq!(pdas.delegate_authority, delegate_authority_address());
    }
}
