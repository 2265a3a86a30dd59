// crates/shipping-rpc/src/handlers/node.rs
//
// Node handlers: Health and ListMethods.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shipping_core::error::ShippingError;

use crate::handlers::consignment::ShippingService;
use crate::server::CountHook;

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// Request for node health status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthRequest {}

/// Response containing node health status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health. Always "healthy" while the server answers.
    pub status: String,
    /// Software version.
    pub version: String,
    /// Number of consignments currently held.
    pub consignment_count: usize,
    /// Seconds since the server started.
    pub uptime_secs: u64,
    /// Wall-clock start time.
    pub started_at: DateTime<Utc>,
}

/// Handle a Health request.
///
/// The count comes from `count_hook` when one is set; otherwise from a
/// repository snapshot.
pub async fn handle_get_health(
    _request: HealthRequest,
    service: &ShippingService,
    count_hook: Option<&CountHook>,
    start_time: Instant,
    started_at: DateTime<Utc>,
) -> Result<HealthResponse, ShippingError> {
    let consignment_count = match count_hook {
        Some(count) => count(),
        None => service.repository().get_all().await.len(),
    };

    Ok(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        consignment_count,
        uptime_secs: start_time.elapsed().as_secs(),
        started_at,
    })
}

// ---------------------------------------------------------------------------
// ListMethods
// ---------------------------------------------------------------------------

/// Request for the list of callable methods.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListMethodsRequest {}

/// Response describing the service and the methods it dispatches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMethodsResponse {
    /// Fully qualified service name.
    pub service: String,
    /// Method names accepted in the request envelope.
    pub methods: Vec<String>,
}

/// Handle a ListMethods request.
pub async fn handle_list_methods(
    _request: ListMethodsRequest,
    service_name: &str,
    methods: &[&str],
) -> Result<ListMethodsResponse, ShippingError> {
    Ok(ListMethodsResponse {
        service: service_name.to_string(),
        methods: methods.iter().map(|m| m.to_string()).collect(),
    })
}
