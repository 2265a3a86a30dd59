// crates/shipping-rpc/src/handlers/mod.rs
//
// Handler modules for all RPC endpoints.
// Each module defines request/response types and the handlers for one API group.

pub mod consignment;
pub mod node;
