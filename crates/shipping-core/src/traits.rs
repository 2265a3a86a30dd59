// crates/shipping-core/src/traits.rs

use async_trait::async_trait;

use crate::consignment::Consignment;
use crate::error::ShippingError;

/// Storage backend for consignments.
///
/// Implemented by shipping-store (in-memory backend). The service layer only
/// ever sees this trait, so a durable or remote backend can be swapped in
/// without touching the RPC handlers.
#[async_trait]
pub trait ConsignmentRepository: Send + Sync {
    /// Append a consignment and return it unchanged.
    ///
    /// The append is atomic with respect to `get_all`. Backends report a
    /// rejected write as `ShippingError::StorageWrite`.
    async fn create(&self, consignment: Consignment) -> Result<Consignment, ShippingError>;

    /// Return every consignment created so far, in insertion order.
    async fn get_all(&self) -> Vec<Consignment>;
}
