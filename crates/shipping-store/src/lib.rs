// crates/shipping-store/src/lib.rs
//
// shipping-store: Storage backends for the shipping consignment service.
//
// Only an in-memory backend exists so far. Durable backends implement the
// same `ConsignmentRepository` trait from shipping-core.

pub mod memory;

// Re-export key types for ergonomic access from downstream crates.
pub use memory::InMemoryConsignmentRepository;
