//! Shared plumbing for EVM venues.
//!
//! Every EVM venue composes the same four pieces:
//!
//! * [`contract::ContractConnection`] — an HTTP provider bound to a contract
//!   address, with the RPC's chain ID verified against the configured chain.
//! * [`erc20::Erc20Contract`] — allowance/balance/approve against a token.
//! * [`typed_data::Domain`] — the venue's EIP-712 domain.
//! * [`wallet::Wallet`] — a local key that signs typed structs and checks
//!   its own token allowances.

pub mod contract;
pub mod erc20;
pub mod typed_data;
pub mod wallet;

pub use contract::ContractConnection;
pub use erc20::Erc20Contract;
pub use typed_data::Domain;
pub use wallet::Wallet;
