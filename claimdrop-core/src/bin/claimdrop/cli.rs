use clap::{Parser, Subcommand};
use claimdrop_core::foundation::Address;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "claimdrop")]
#[command(about = "Allocation/claim contract client", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override data directory
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Override algod URL
    #[arg(short, long)]
    pub node_url: Option<String>,

    /// Override the active network
    #[arg(long)]
    pub network: Option<String>,

    /// Log filters (e.g. `info`, `debug,reqwest=info`)
    #[arg(short, long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the reward token id from contract global state
    TokenId,

    /// Print the storage-box key of an address
    BoxKey { address: String },

    /// Add allocations for addresses (amounts in human units)
    AddAllocations {
        #[arg(long, value_delimiter = ',', required_unless_present = "from_backend")]
        addresses: Vec<Address>,
        #[arg(long, value_delimiter = ',', required_unless_present = "from_backend")]
        amounts: Vec<Decimal>,
        #[arg(long)]
        decimals: u32,
        /// Take addresses and amounts from the backend
        #[arg(long, conflicts_with_all = ["addresses", "amounts"])]
        from_backend: bool,
        /// Notify the backend after confirmation
        #[arg(long)]
        notify: bool,
    },

    /// Reclaim the allocation of an address
    Reclaim {
        address: Address,
        #[arg(long)]
        notify: bool,
    },

    /// Claim rewards for the signer's account
    Claim {
        #[arg(long)]
        notify: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
