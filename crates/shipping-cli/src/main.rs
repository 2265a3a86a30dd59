// crates/shipping-cli/src/main.rs
//
// CLI entrypoint for the shipping consignment service.
//
// Provides subcommands for creating consignments, listing them, and checking
// the daemon's health.

mod commands;
mod error;
mod output;
mod rpc_client;

use clap::{Parser, Subcommand};
use commands::consignment::CreateCmd;
use output::OutputFormat;
use rpc_client::RpcClient;

/// Shipping CLI: talk to a running shipping-daemon.
#[derive(Parser, Debug)]
#[command(name = "shipping", version, about = "Shipping consignment service CLI")]
struct Cli {
    /// RPC endpoint for the shipping-daemon.
    #[arg(long, global = true, default_value = "http://localhost:50051")]
    rpc: String,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a consignment from a JSON file or from flags.
    Create(CreateCmd),

    /// List every consignment held by the daemon.
    List,

    /// Display daemon health and version info.
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = RpcClient::new(&cli.rpc);
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };

    match &cli.command {
        Commands::Create(cmd) => commands::consignment::run_create(&client, cmd, &format).await?,
        Commands::List => commands::consignment::run_list(&client, &format).await?,
        Commands::Status => commands::status::run(&client, &format).await?,
    }

    Ok(())
}
