//! Terminal output for command results.

use chrono::DateTime;
use colored::Colorize;
use sdk_commons::{
    U256,
    config::{AuthorizationPages, BidValidation, OfferDetails, OfferTokenDetails},
};
use tabled::{Table, Tabled, settings::Style};

pub fn banner(title: &str) {
    println!("{}", format!("{:#^80}", format!(" {title} ")).bold().purple());
}

pub fn chains(chains: &[sdk_commons::Chain], pages: AuthorizationPages) {
    banner("Supported chains");
    for chain in chains {
        println!("  {} (id {})", chain.to_string().green(), chain.id());
    }
    println!("Approve spending at {} (mainnet)", pages.mainnet.cyan());
    println!("                    {} (testnet)", pages.testnet.cyan());
}

#[derive(Tabled)]
struct OfferRow {
    field: &'static str,
    value: String,
}

pub fn offer(offer_id: U256, details: &OfferDetails) {
    banner(&format!("Offer {offer_id}"));
    let rows = [
        OfferRow { field: "seller", value: details.seller.clone() },
        OfferRow { field: "offer token", value: details.offer_token.clone() },
        OfferRow { field: "bidding token", value: details.bidding_token.clone() },
        OfferRow { field: "min price", value: details.min_price.to_string() },
        OfferRow { field: "min bid size", value: details.min_bid_size.to_string() },
        OfferRow { field: "total size", value: details.total_size.to_string() },
        OfferRow { field: "available size", value: details.available_size.to_string() },
    ];
    println!("{}", Table::new(rows).with(Style::rounded()));
}

pub fn token(details: &OfferTokenDetails) {
    banner("Offered token");
    let expiry = DateTime::from_timestamp(details.expiry_timestamp as i64, 0)
        .map(|ts| ts.to_rfc3339())
        .unwrap_or_else(|| details.expiry_timestamp.to_string());
    let rows = [
        OfferRow { field: "collateral asset", value: details.collateral_asset.clone() },
        OfferRow { field: "underlying asset", value: details.underlying_asset.clone() },
        OfferRow { field: "strike asset", value: details.strike_asset.clone() },
        OfferRow { field: "strike price", value: details.strike_price.to_string() },
        OfferRow { field: "expiry", value: expiry },
        OfferRow {
            field: "type",
            value: if details.is_put { "put" } else { "call" }.to_string(),
        },
    ];
    println!("{}", Table::new(rows).with(Style::rounded()));
}

pub fn validation(validation: &BidValidation) {
    if validation.is_valid() {
        println!("{}", "bid is valid".green().bold());
        return;
    }
    println!("{}", "bid is invalid".red().bold());
    for error in &validation.errors {
        println!("  - {error}");
    }
}

pub fn allowance(granted: bool) {
    if granted {
        println!("{}", "allowance is sufficient".green().bold());
    } else {
        println!("{}", "allowance is missing or too small".red().bold());
    }
}
