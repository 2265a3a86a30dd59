// crates/shipping-cli/src/commands/status.rs
//
// `shipping status` — display daemon health and version info.

use shipping_rpc::handlers::node::{HealthRequest, HealthResponse};

use crate::output::{format_json, OutputFormat};
use crate::rpc_client::RpcClient;

/// Run the status command.
pub async fn run(client: &RpcClient, format: &OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let health: HealthResponse = client.call("Health", &HealthRequest {}).await?;

    if *format == OutputFormat::Json {
        println!("{}", format_json(&health));
        return Ok(());
    }

    println!("Shipping daemon v{}", health.version);
    println!();
    println!("Node Status");
    println!("-----------");
    println!("  RPC endpoint:  {}", client.url());
    println!("  Status:        {}", health.status);
    println!("  Consignments:  {}", health.consignment_count);
    println!("  Uptime:        {}s", health.uptime_secs);
    println!("  Started at:    {}", health.started_at.to_rfc3339());

    Ok(())
}
