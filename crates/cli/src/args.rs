use clap::{Args, Parser, Subcommand, ValueEnum};
use sdk_commons::{U256, config::BidParams};

pub const DEFAULT_RPC_PROVIDER: &str = "http://localhost:8545";

#[derive(Debug, Parser)]
#[command(author, version, about = "Command-line access to the venue adapters")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Venue adapter to route the command through
    #[arg(long, global = true, value_enum, default_value_t = Venue::Ribbon)]
    pub venue: Venue,

    /// RPC endpoint (ignored by Solana venues, which resolve it from the chain)
    #[arg(long, global = true, default_value = DEFAULT_RPC_PROVIDER)]
    pub rpc: String,

    /// Chain name or numeric chain ID
    #[arg(long, global = true, default_value = "ethereum")]
    pub chain_id: String,

    /// Deployed venue contract address
    #[arg(long, global = true, default_value = "")]
    pub contract: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Venue {
    Ribbon,
    Opyn,
    Thetanuts,
    Friktion,
    Template,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the chains the venue supports
    Chains,
    /// Fetch a live offer
    OfferDetails {
        #[arg(long)]
        offer_id: U256,

        /// Offer creator, required by venues that derive offers from their
        /// creator
        #[arg(long)]
        seller: Option<String>,
    },
    /// Fetch details of the option token backing an offer
    TokenDetails {
        #[arg(long, default_value_t = U256::ZERO)]
        offer_id: U256,

        #[arg(long)]
        seller: Option<String>,
    },
    /// Post a new offer
    CreateOffer {
        #[arg(long)]
        offer_token: String,

        #[arg(long)]
        bidding_token: String,

        #[arg(long, default_value_t = U256::ZERO)]
        min_price: U256,

        #[arg(long, default_value_t = U256::ZERO)]
        min_bid_size: U256,

        #[arg(long)]
        offer_amount: U256,

        #[arg(long)]
        public_key: String,

        #[arg(long, env = "VENUE_PRIVATE_KEY", hide_env_values = true)]
        private_key: String,

        /// Options program account backing the offer (Solana venues)
        #[arg(long)]
        options_contract: Option<String>,

        /// Restrict the offer to a single counterparty (Solana venues)
        #[arg(long)]
        counterparty: Option<String>,
    },
    /// Sign a bid for an offer
    SignBid {
        #[command(flatten)]
        bid: BidArgs,

        #[arg(long)]
        public_key: String,

        #[arg(long, env = "VENUE_PRIVATE_KEY", hide_env_values = true)]
        private_key: String,
    },
    /// Check a signed bid against the venue's rules
    ValidateBid {
        #[command(flatten)]
        bid: BidArgs,

        /// Wire-format signature as produced by sign-bid
        #[arg(long)]
        signature: String,

        #[arg(long)]
        seller: Option<String>,
    },
    /// Check that the venue contract may spend a token on the wallet's behalf
    VerifyAllowance {
        #[arg(long)]
        public_key: String,

        #[arg(long)]
        token_address: String,
    },
}

#[derive(Clone, Debug, Args)]
pub struct BidArgs {
    #[arg(long)]
    pub swap_id: U256,

    #[arg(long, default_value_t = 0)]
    pub nonce: u64,

    #[arg(long)]
    pub signer_wallet: String,

    /// Bidding-token units paid by the bidder
    #[arg(long)]
    pub sell_amount: U256,

    /// Option-token units bought
    #[arg(long)]
    pub buy_amount: U256,

    #[arg(long, default_value = "0x0000000000000000000000000000000000000000")]
    pub referrer: String,
}

impl From<BidArgs> for BidParams {
    fn from(args: BidArgs) -> Self {
        BidParams {
            swap_id: args.swap_id,
            nonce: args.nonce,
            signer_wallet: args.signer_wallet,
            sell_amount: args.sell_amount,
            buy_amount: args.buy_amount,
            referrer: args.referrer,
        }
    }
}
