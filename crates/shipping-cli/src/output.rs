// crates/shipping-cli/src/output.rs
//
// Output formatting utilities for the shipping CLI.
// Supports table and JSON output modes.

use serde::Serialize;
use tabled::{Table, Tabled};

use shipping_core::consignment::Consignment;

/// Output format for CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed table output (default).
    Table,
    /// JSON output for machine consumption.
    Json,
}

/// One table row per consignment.
#[derive(Debug, Tabled)]
pub struct ConsignmentRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Weight")]
    pub weight: i32,
    #[tabled(rename = "Containers")]
    pub containers: usize,
    #[tabled(rename = "Vessel")]
    pub vessel_id: String,
}

impl From<&Consignment> for ConsignmentRow {
    fn from(c: &Consignment) -> Self {
        Self {
            id: c.id.clone(),
            description: c.description.clone(),
            weight: c.weight,
            containers: c.containers.len(),
            vessel_id: c.vessel_id.clone(),
        }
    }
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format consignments as a table.
pub fn format_consignments(consignments: &[Consignment]) -> String {
    let rows: Vec<ConsignmentRow> = consignments.iter().map(ConsignmentRow::from).collect();
    format_table(&rows)
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}
