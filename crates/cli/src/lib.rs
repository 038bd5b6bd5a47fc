pub mod args;
mod render;

use anyhow::Context;
use sdk_commons::{
    Chain, SdkConfig,
    config::{ContractConfig, CreateOfferParams, OfferQuery, SignBidParams, SignedBidParams},
};
use tracing_subscriber::EnvFilter;

use crate::args::{Cli, Commands, Venue};

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match cli.venue {
        Venue::Ribbon => dispatch(ribbon_sdk::RibbonSdk, &cli).await,
        Venue::Opyn => dispatch(opyn_sdk::OpynSdk, &cli).await,
        Venue::Thetanuts => dispatch(thetanuts_sdk::ThetanutsSdk, &cli).await,
        Venue::Friktion => dispatch(friktion_sdk::FriktionSdk, &cli).await,
        Venue::Template => dispatch(template_sdk::TemplateSdk, &cli).await,
    }
}

async fn dispatch<S: SdkConfig>(sdk: S, cli: &Cli) -> anyhow::Result<()> {
    let chain: Chain = cli
        .chain_id
        .parse()
        .with_context(|| format!("unrecognized chain: {}", cli.chain_id))?;
    let config = ContractConfig::new(&cli.contract, chain, &cli.rpc);

    match &cli.command {
        Commands::Chains => {
            render::chains(sdk.supported_chains(), sdk.authorization_pages());
        }
        Commands::OfferDetails { offer_id, seller } => {
            let query = OfferQuery { offer_id: *offer_id, seller: seller.clone() };
            let details = sdk
                .get_offer_details(&config, &query)
                .await
                .context("failed to fetch the offer")?;
            render::offer(*offer_id, &details);
        }
        Commands::TokenDetails { offer_id, seller } => {
            let query = OfferQuery { offer_id: *offer_id, seller: seller.clone() };
            let details = sdk
                .get_offer_token_details(&config, &query)
                .await
                .context("failed to fetch the offered token")?;
            render::token(&details);
        }
        Commands::CreateOffer {
            offer_token,
            bidding_token,
            min_price,
            min_bid_size,
            offer_amount,
            public_key,
            private_key,
            options_contract,
            counterparty,
        } => {
            let params = CreateOfferParams {
                offer_token: offer_token.clone(),
                bidding_token: bidding_token.clone(),
                min_price: *min_price,
                min_bid_size: *min_bid_size,
                offer_amount: *offer_amount,
                public_key: public_key.clone(),
                private_key: private_key.clone(),
                options_contract: options_contract.clone(),
                counterparty: counterparty.clone(),
            };
            let offer_id = sdk
                .create_offer(&config, &params)
                .await
                .context("failed to create the offer")?;
            println!("created offer {offer_id}");
        }
        Commands::SignBid { bid, public_key, private_key } => {
            let params = SignBidParams {
                bid: bid.clone().into(),
                public_key: public_key.clone(),
                private_key: private_key.clone(),
            };
            let signature = sdk
                .sign_bid(&config, &params)
                .await
                .context("failed to sign the bid")?;
            println!("{signature}");
        }
        Commands::ValidateBid { bid, signature, seller } => {
            let params = SignedBidParams {
                bid: bid.clone().into(),
                seller: seller.clone(),
                signature: signature.clone(),
            };
            let validation = sdk
                .validate_bid(&config, &params)
                .await
                .context("failed to validate the bid")?;
            render::validation(&validation);
        }
        Commands::VerifyAllowance { public_key, token_address } => {
            let granted = sdk
                .verify_allowance(&config, public_key, token_address)
                .await
                .context("failed to check the allowance")?;
            render::allowance(granted);
        }
    }

    Ok(())
}
