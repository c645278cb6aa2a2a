use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Alpha token ledger and faucet CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Ledger database path
    #[arg(long, default_value = "./alpha_ledger", env = "ALPHA_DB_PATH")]
    pub db: PathBuf,

    /// Caller role attribute (admin, minter or user)
    #[arg(long, default_value = "user", env = "ALPHA_ROLE")]
    pub role: String,

    /// Caller userId attribute
    #[arg(long, default_value = "anonymous", env = "ALPHA_USER_ID")]
    pub user: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Idempotent bootstrap; writes nothing
    InitLedger,
    /// Write the fixed token metadata (admin only)
    SetToken,
    /// Read the token name
    GetTokenName,
    /// Read the token symbol
    GetTokenSymbol,
    /// Read the token decimals
    GetTokenDecimals,
    /// Read the current total supply
    GetTotalSupply,
    /// Overwrite the caller's wallet with the given state
    CreateWallet {
        #[arg(long)]
        timestamp: i64,
        #[arg(long)]
        amount: i64,
    },
    /// Read the caller's balance
    GetBalance,
    /// Credit the caller's wallet and grow the supply (minter/admin)
    MintToken {
        #[arg(long)]
        amount: i64,
    },
    /// Move balance from the caller to a receiver
    Transfer {
        #[arg(long)]
        receiver: String,
        #[arg(long)]
        amount: i64,
    },
    /// Read the faucet reserve record
    FaucetBalance,
    /// Set the faucet reserve and cooldown policy (admin only)
    SetFaucetWallet {
        #[arg(long)]
        amount: i64,
        #[arg(long)]
        time_delay: i64,
        #[arg(long)]
        timestamp: i64,
    },
    /// Request the fixed faucet grant for an account
    RequestToken {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        timestamp: i64,
    },
    /// List every committed ledger entry
    QueryAllAssets,
    /// Replay the committed history of one key
    QueryHistoryOfAsset {
        #[arg(long)]
        asset_id: String,
    },
}
