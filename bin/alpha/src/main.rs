mod cli;

use alpha_ledger::SledLedger;
use alpha_token::{FaucetContract, StaticIdentity};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    let env_filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    info!("Opening ledger at {:?}", args.db);
    let ledger = SledLedger::open(&args.db)?;
    let contract = FaucetContract::new(ledger);
    let identity = StaticIdentity::new(&args.role, &args.user);

    let output = match args.command {
        cli::Commands::InitLedger => serde_json::to_value(contract.init_ledger())?,
        cli::Commands::SetToken => serde_json::to_value(contract.set_token(&identity))?,
        cli::Commands::GetTokenName => serde_json::to_value(contract.get_token_name())?,
        cli::Commands::GetTokenSymbol => serde_json::to_value(contract.get_token_symbol())?,
        cli::Commands::GetTokenDecimals => serde_json::to_value(contract.get_token_decimals())?,
        cli::Commands::GetTotalSupply => serde_json::to_value(contract.get_total_supply())?,
        cli::Commands::CreateWallet { timestamp, amount } => {
            serde_json::to_value(contract.create_wallet(&identity, timestamp, amount))?
        }
        cli::Commands::GetBalance => serde_json::to_value(contract.get_balance(&identity))?,
        cli::Commands::MintToken { amount } => {
            serde_json::to_value(contract.mint_token(&identity, amount))?
        }
        cli::Commands::Transfer { receiver, amount } => {
            serde_json::to_value(contract.transfer(&identity, &receiver, amount))?
        }
        cli::Commands::FaucetBalance => serde_json::to_value(contract.faucet_balance())?,
        cli::Commands::SetFaucetWallet {
            amount,
            time_delay,
            timestamp,
        } => serde_json::to_value(contract.set_faucet_wallet(
            &identity, amount, time_delay, timestamp,
        ))?,
        cli::Commands::RequestToken { user_id, timestamp } => {
            serde_json::to_value(contract.request_token(&user_id, timestamp))?
        }
        cli::Commands::QueryAllAssets => serde_json::to_value(contract.query_all_assets())?,
        cli::Commands::QueryHistoryOfAsset { asset_id } => {
            serde_json::to_value(contract.query_history_of_asset(&asset_id))?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
