// crates/shipping-cli/src/commands/mod.rs
//
// Command module declarations for the shipping CLI.

pub mod consignment;
pub mod status;
