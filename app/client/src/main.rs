use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use explorer_client::{AddressQuery, Addresses, ClientConfig};

/// Query address balances, transactions and unspent outputs
/// from an Insight-style block explorer.
///
/// The endpoint and network come from EXPLORER_API_URL, EXPLORER_NETWORK,
/// EXPLORER_BATCH_SIZE and EXPLORER_TIMEOUT_SECS.
#[derive(Parser)]
#[command(name = "explorer-client", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Balance, total received and transaction count
    Summary {
        #[arg(required = true)]
        addresses: Vec<String>,
    },
    /// Full transactions touching the addresses
    Transactions {
        /// Accepted for compatibility; the explorer cannot filter on it
        #[arg(long)]
        block_height: Option<u64>,
        #[arg(required = true)]
        addresses: Vec<String>,
    },
    /// Unspent outputs
    Unspents {
        #[arg(required = true)]
        addresses: Vec<String>,
    },
}

fn to_query(mut addresses: Vec<String>) -> AddressQuery {
    if addresses.len() == 1 {
        AddressQuery::One(addresses.remove(0))
    } else {
        AddressQuery::Many(addresses)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{}", json);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env().context("Failed to load configuration")?;
    let addresses = Addresses::from_config(&config).context("Failed to build explorer client")?;

    match cli.command {
        Command::Summary { addresses: list } => {
            let summary = addresses
                .summary(to_query(list))
                .await
                .context("Address summary failed")?;
            print_json(&summary)?;
        }
        Command::Transactions {
            block_height,
            addresses: list,
        } => {
            let txs = addresses
                .transactions(to_query(list), block_height)
                .await
                .context("Transaction lookup failed")?;
            info!("Fetched {} transaction(s)", txs.len());
            print_json(&txs)?;
        }
        Command::Unspents { addresses: list } => {
            let unspents = addresses
                .unspents(to_query(list))
                .await
                .context("Unspent lookup failed")?;
            print_json(&unspents)?;
        }
    }

    Ok(())
}
