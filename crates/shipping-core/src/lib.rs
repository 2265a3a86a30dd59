// crates/shipping-core/src/lib.rs
//
// shipping-core: Core types, error type, and the repository trait for the
// shipping consignment service.
//
// This is the leaf crate that the store, RPC, daemon, and CLI crates depend on.

pub mod consignment;
pub mod error;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use shipping_core::Consignment;`
pub use consignment::{Consignment, Container};
pub use error::ShippingError;
pub use traits::ConsignmentRepository;
