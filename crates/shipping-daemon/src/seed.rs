// crates/shipping-daemon/src/seed.rs
//
// Startup seeding: read a JSON array of consignments and hand it to the
// in-memory repository before the listener opens.

use std::fs;

use shipping_core::consignment::Consignment;

use crate::error::DaemonError;

/// Read and parse a seed file.
pub fn load_seed_file(path: &str) -> Result<Vec<Consignment>, DaemonError> {
    let contents = fs::read_to_string(path).map_err(|source| DaemonError::ReadFile {
        path: path.to_string(),
        source,
    })?;
    parse_seed(&contents)
}

pub fn parse_seed(contents: &str) -> Result<Vec<Consignment>, DaemonError> {
    Ok(serde_json::from_str(contents)?)
}
