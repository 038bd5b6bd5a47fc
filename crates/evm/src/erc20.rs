use alloy::{
    primitives::{Address, U256},
    sol,
};
use fastnum::{UD256, udec256};
use sdk_commons::{SdkError, config::ContractConfig, error::Result};

use crate::contract::{ContractConnection, parse_address};

sol! {
    #[sol(rpc)]
    contract IERC20 {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function balanceOf(address owner) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }
}

/// Converts a raw token amount into decimal units of the given scale.
pub fn to_decimal(raw: U256, decimals: u8) -> Result<UD256> {
    let value: UD256 = raw
        .to_string()
        .parse()
        .map_err(|_| SdkError::InvalidArgument(format!("amount out of range: {}", raw)))?;
    let mut scale = udec256!(1);
    for _ in 0..decimals {
        scale *= udec256!(10);
    }
    Ok(value / scale)
}

/// An ERC-20 token bound to a provider, with its metadata cached at connect
/// time.
#[derive(Clone, Debug)]
pub struct Erc20Contract {
    connection: ContractConnection,
    name: String,
    symbol: String,
    decimals: u8,
}

impl Erc20Contract {
    pub async fn connect(config: &ContractConfig) -> Result<Self> {
        let connection = ContractConnection::connect(config).await?;
        Self::bind(connection).await
    }

    /// Reuses an existing connection (same provider, token address).
    pub async fn bind(connection: ContractConnection) -> Result<Self> {
        let token = IERC20::new(connection.address(), connection.provider().clone());
        let name = token.name().call().await.map_err(SdkError::rpc)?;
        let symbol = token.symbol().call().await.map_err(SdkError::rpc)?;
        let decimals = token.decimals().call().await.map_err(SdkError::rpc)?;
        Ok(Self { connection, name, symbol, decimals })
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn symbol(&self) -> &str { &self.symbol }

    pub fn decimals(&self) -> u8 { self.decimals }

    pub fn address(&self) -> Address { self.connection.address() }

    /// Amount `spender` may move on behalf of `owner`, in raw units.
    pub async fn allowance(&self, owner: Address, spender: Address) -> Result<U256> {
        let token = IERC20::new(self.connection.address(), self.connection.provider().clone());
        token
            .allowance(owner, spender)
            .call()
            .await
            .map_err(SdkError::rpc)
    }

    /// Same as [`Self::allowance`], normalized by the token's decimals.
    pub async fn allowance_decimal(&self, owner: Address, spender: Address) -> Result<UD256> {
        let raw = self.allowance(owner, spender).await?;
        to_decimal(raw, self.decimals)
    }

    pub async fn balance_of(&self, owner: Address) -> Result<U256> {
        let token = IERC20::new(self.connection.address(), self.connection.provider().clone());
        token.balanceOf(owner).call().await.map_err(SdkError::rpc)
    }

    /// Sends an `approve` transaction. The connection must have been created
    /// with [`ContractConnection::connect_with_signer`].
    pub async fn approve(&self, spender: &str, amount: U256) -> Result<()> {
        let spender = parse_address(spender)?;
        let token = IERC20::new(self.connection.address(), self.connection.provider().clone());
        let receipt = token
            .approve(spender, amount)
            .send()
            .await
            .map_err(SdkError::rpc)?
            .get_receipt()
            .await
            .map_err(SdkError::rpc)?;
        if !receipt.status() {
            return Err(SdkError::Reverted(receipt.transaction_hash.to_string()));
        }
        tracing::debug!(token = %self.symbol, %spender, %amount, "approved spender");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_conversion() {
        assert_eq!(to_decimal(U256::from(1_500_000u64), 6).unwrap(), udec256!(1.5));
        assert_eq!(to_decimal(U256::ZERO, 18).unwrap(), udec256!(0));
        assert_eq!(to_decimal(U256::from(42u64), 0).unwrap(), udec256!(42));
    }

    #[test]
    fn decimal_conversion_large_scale() {
        let raw = U256::from(10u64).pow(U256::from(18u64));
        assert_eq!(to_decimal(raw, 18).unwrap(), udec256!(1));
    }
}
