//! Details of the oToken (the option token Ribbon offers are denominated in).

use alloy::sol;
use evm_commons::{ContractConnection, erc20::to_decimal};
use sdk_commons::{
    SdkError,
    config::{ContractConfig, OfferTokenDetails},
    error::Result,
};

sol! {
    #[sol(rpc)]
    contract Otoken {
        function getOtokenDetails() external view returns (
            address collateralAsset,
            address underlyingAsset,
            address strikeAsset,
            uint256 strikePrice,
            uint256 expiryTimestamp,
            bool isPut
        );
    }
}

/// oTokens quote strikes with 8 decimals regardless of the strike asset.
const STRIKE_DECIMALS: u8 = 8;

pub struct OtokenContract {
    connection: ContractConnection,
}

impl OtokenContract {
    pub async fn connect(config: &ContractConfig) -> Result<Self> {
        Ok(Self { connection: ContractConnection::connect(config).await? })
    }

    pub async fn get_otoken_details(&self) -> Result<OfferTokenDetails> {
        let otoken = Otoken::new(self.connection.address(), self.connection.provider().clone());
        let details = otoken
            .getOtokenDetails()
            .call()
            .await
            .map_err(SdkError::rpc)?;

        Ok(OfferTokenDetails {
            collateral_asset: details.collateralAsset.to_string(),
            underlying_asset: details.underlyingAsset.to_string(),
            strike_asset: details.strikeAsset.to_string(),
            strike_price: to_decimal(details.strikePrice, STRIKE_DECIMALS)?,
            expiry_timestamp: details.expiryTimestamp.to::<u64>(),
            is_put: details.isPut,
        })
    }
}
