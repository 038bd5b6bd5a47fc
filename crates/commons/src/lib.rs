//! Common surface shared by every venue SDK.
//!
//! # Overview
//!
//! The aggregator drives each venue through the [`config::SdkConfig`] trait:
//! a handful of primitive parameters in, a small set of common result shapes
//! out. Venue crates implement the trait on a unit struct and translate the
//! parameters into whatever their deployed contract expects.
//!
//! Amounts cross this boundary as raw token units ([`alloy::primitives::U256`])
//! and only strike prices are normalized to decimals, since every venue
//! reports them at a different fixed-point scale.

pub mod chains;
pub mod config;
pub mod error;
pub mod helpers;

pub use alloy::primitives::U256;
pub use chains::Chain;
pub use config::SdkConfig;
pub use error::{Result, SdkError};
