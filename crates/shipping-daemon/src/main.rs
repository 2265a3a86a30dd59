// crates/shipping-daemon/src/main.rs
//
// Binary entrypoint for the shipping consignment daemon.
//
// Parses CLI arguments, loads configuration, initializes tracing, builds the
// in-memory repository, and serves the RPC API until Ctrl-C.

mod config;
mod error;
mod seed;

use std::sync::Arc;

use clap::Parser;
use config::{expand_tilde, DaemonConfig};

use shipping_rpc::ShippingRpcServer;
use shipping_store::InMemoryConsignmentRepository;

/// Shipping consignment daemon.
#[derive(Parser, Debug)]
#[command(name = "shipping-daemon", version, about = "Shipping consignment RPC daemon")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "~/.shipping/config.toml")]
    config: String,

    /// Override the RPC bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the RPC port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration from TOML file, falling back to defaults only if the
    // file is missing. The outcome is logged once tracing is up.
    let config_path = expand_tilde(&args.config);
    let (mut daemon_config, config_found) = DaemonConfig::load_or_default(&config_path)?;

    // CLI flags override the config file.
    if let Some(host) = args.host {
        daemon_config.rpc_host = host;
    }
    if let Some(port) = args.port {
        daemon_config.rpc_port = port;
    }

    // Initialize tracing subscriber for structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&daemon_config.log_level)),
        )
        .init();

    if config_found {
        tracing::info!("Loaded configuration from {}", config_path);
    } else {
        tracing::warn!("No config file at {}. Using defaults.", config_path);
    }

    tracing::info!("Shipping daemon v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "RPC endpoint: {}:{}",
        daemon_config.rpc_host,
        daemon_config.rpc_port
    );

    let repo = match &daemon_config.seed_file {
        Some(path) => {
            let path = expand_tilde(path);
            let consignments = seed::load_seed_file(&path)?;
            tracing::info!("Seeded {} consignments from {}", consignments.len(), path);
            InMemoryConsignmentRepository::with_consignments(consignments)
        }
        None => InMemoryConsignmentRepository::new(),
    };

    let repo = Arc::new(repo);
    let counter = repo.clone();
    let server = ShippingRpcServer::new(daemon_config.rpc_config(), repo)
        .with_count_hook(Arc::new(move || counter.len()));

    server
        .start_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Shutdown signal received");
        })
        .await?;

    tracing::info!("Shipping daemon shut down gracefully");
    Ok(())
}
