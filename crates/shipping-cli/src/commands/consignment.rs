// crates/shipping-cli/src/commands/consignment.rs
//
// `shipping create` and `shipping list` — consignment commands.

use clap::Args;

use shipping_core::consignment::{Consignment, Container};
use shipping_rpc::{GetRequest, Response};

use crate::error::CliError;
use crate::output::{format_consignments, format_json, OutputFormat};
use crate::rpc_client::RpcClient;

/// Create a consignment.
#[derive(Debug, Default, Args)]
pub struct CreateCmd {
    /// Read the consignment from a JSON file. Other flags override its fields.
    #[arg(long)]
    pub file: Option<String>,

    /// Consignment ID. A fresh UUID is used when neither the file nor this flag sets one.
    #[arg(long)]
    pub id: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub weight: Option<i32>,

    #[arg(long)]
    pub vessel_id: Option<String>,

    /// Container as `id:customer_id:origin:user_id`. Repeatable.
    #[arg(long = "container")]
    pub containers: Vec<String>,
}

/// Assemble the consignment to send from the file (if any) and the flags.
pub fn build_consignment(cmd: &CreateCmd) -> Result<Consignment, CliError> {
    let mut consignment = match &cmd.file {
        Some(path) => {
            let contents = std::fs::read_to_string(path).map_err(|source| CliError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&contents)?
        }
        None => Consignment::default(),
    };

    if let Some(id) = &cmd.id {
        consignment.id = id.clone();
    }
    if let Some(description) = &cmd.description {
        consignment.description = description.clone();
    }
    if let Some(weight) = cmd.weight {
        consignment.weight = weight;
    }
    if let Some(vessel_id) = &cmd.vessel_id {
        consignment.vessel_id = vessel_id.clone();
    }
    for spec in &cmd.containers {
        consignment.containers.push(parse_container(spec)?);
    }

    if consignment.id.is_empty() {
        consignment.id = uuid::Uuid::now_v7().to_string();
    }

    Ok(consignment)
}

fn parse_container(spec: &str) -> Result<Container, CliError> {
    let parts: Vec<&str> = spec.split(':').collect();
    match parts.as_slice() {
        [id, customer_id, origin, user_id] => Ok(Container {
            id: id.to_string(),
            customer_id: customer_id.to_string(),
            origin: origin.to_string(),
            user_id: user_id.to_string(),
        }),
        _ => Err(CliError::InvalidContainer(spec.to_string())),
    }
}

/// Run the create command.
pub async fn run_create(
    client: &RpcClient,
    cmd: &CreateCmd,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let consignment = build_consignment(cmd)?;
    let resp: Response = client.call("CreateConsignment", &consignment).await?;

    match format {
        OutputFormat::Json => println!("{}", format_json(&resp)),
        OutputFormat::Table => {
            println!("Created: {}", resp.created);
            if let Some(c) = &resp.consignment {
                println!("{}", format_consignments(std::slice::from_ref(c)));
            }
        }
    }

    Ok(())
}

/// Run the list command.
pub async fn run_list(
    client: &RpcClient,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let resp: Response = client.call("GetConsignments", &GetRequest {}).await?;

    match format {
        OutputFormat::Json => println!("{}", format_json(&resp.consignments)),
        OutputFormat::Table if resp.consignments.is_empty() => println!("No consignments."),
        OutputFormat::Table => println!("{}", format_consignments(&resp.consignments)),
    }

    Ok(())
}
