// crates/shipping-rpc/src/handlers/consignment.rs
//
// Consignment handlers: CreateConsignment and GetConsignments.
// Both delegate to whatever `ConsignmentRepository` the service was built with.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use shipping_core::consignment::Consignment;
use shipping_core::error::ShippingError;
use shipping_core::traits::ConsignmentRepository;

use crate::context::CallContext;

// ---------------------------------------------------------------------------
// Request / Response
// ---------------------------------------------------------------------------

/// Request marker for GetConsignments. Carries no fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetRequest {}

/// Response envelope shared by both consignment calls.
///
/// CreateConsignment fills `created` and `consignment`; GetConsignments fills
/// `consignments` and leaves `created` false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Response {
    /// True when this call stored a new consignment.
    pub created: bool,
    /// The consignment just stored.
    pub consignment: Option<Consignment>,
    /// Every consignment stored so far, in insertion order.
    pub consignments: Vec<Consignment>,
}

// ---------------------------------------------------------------------------
// ShippingService
// ---------------------------------------------------------------------------

/// The RPC-facing shipping service.
///
/// Holds no state besides the injected repository.
#[derive(Clone)]
pub struct ShippingService {
    repo: Arc<dyn ConsignmentRepository>,
}

impl std::fmt::Debug for ShippingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShippingService").finish_non_exhaustive()
    }
}

impl ShippingService {
    pub fn new(repo: Arc<dyn ConsignmentRepository>) -> Self {
        Self { repo }
    }

    /// The repository this service delegates to.
    pub fn repository(&self) -> &Arc<dyn ConsignmentRepository> {
        &self.repo
    }

    /// Handle a CreateConsignment call.
    ///
    /// Repository failures are returned as-is; there is no retry.
    pub async fn create_consignment(
        &self,
        ctx: &CallContext,
        request: Consignment,
    ) -> Result<Response, ShippingError> {
        ctx.check()?;
        tracing::info!(id = %request.id, "Creating new consignment");

        let consignment = self.repo.create(request).await.map_err(|e| {
            tracing::warn!("Failed to create consignment: {}", e);
            e
        })?;

        Ok(Response {
            created: true,
            consignment: Some(consignment),
            consignments: Vec::new(),
        })
    }

    /// Handle a GetConsignments call.
    pub async fn get_consignments(
        &self,
        ctx: &CallContext,
        _request: GetRequest,
    ) -> Result<Response, ShippingError> {
        ctx.check()?;
        tracing::info!("Returning all consignments");

        let consignments = self.repo.get_all().await;
        Ok(Response {
            consignments,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use shipping_store::InMemoryConsignmentRepository;

    use super::*;

    /// Backend that rejects every write, standing in for an unreachable store.
    struct RejectingRepository;

    #[async_trait]
    impl ConsignmentRepository for RejectingRepository {
        async fn create(&self, _consignment: Consignment) -> Result<Consignment, ShippingError> {
            Err(ShippingError::StorageWrite("backend offline".to_string()))
        }

        async fn get_all(&self) -> Vec<Consignment> {
            Vec::new()
        }
    }

    fn service() -> (ShippingService, Arc<InMemoryConsignmentRepository>) {
        let repo = Arc::new(InMemoryConsignmentRepository::new());
        (ShippingService::new(repo.clone()), repo)
    }

    fn sample(id: &str) -> Consignment {
        Consignment {
            id: id.to_string(),
            description: "This is a test consignment".to_string(),
            weight: 550,
            vessel_id: "vessel001".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_sets_created_flag_and_echoes_record() {
        let (svc, repo) = service();
        let resp = svc
            .create_consignment(&CallContext::background(), sample("x1"))
            .await
            .unwrap();

        assert!(resp.created);
        assert_eq!(resp.consignment, Some(sample("x1")));
        assert!(resp.consignments.is_empty());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_get_returns_all_without_created_flag() {
        let (svc, _repo) = service();
        let ctx = CallContext::background();
        svc.create_consignment(&ctx, sample("a")).await.unwrap();
        svc.create_consignment(&ctx, sample("b")).await.unwrap();

        let resp = svc.get_consignments(&ctx, GetRequest {}).await.unwrap();
        assert!(!resp.created);
        assert!(resp.consignment.is_none());
        let ids: Vec<&str> = resp.consignments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_get_on_empty_repository() {
        let (svc, _repo) = service();
        let resp = svc
            .get_consignments(&CallContext::background(), GetRequest::default())
            .await
            .unwrap();
        assert!(resp.consignments.is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_propagates_unchanged() {
        let svc = ShippingService::new(Arc::new(RejectingRepository));
        let err = svc
            .create_consignment(&CallContext::background(), sample("x1"))
            .await
            .unwrap_err();

        match err {
            ShippingError::StorageWrite(msg) => assert_eq!(msg, "backend offline"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_expired_deadline_aborts_before_append() {
        let (svc, repo) = service();
        let ctx = CallContext::with_timeout(Duration::ZERO);

        let err = svc.create_consignment(&ctx, sample("late")).await.unwrap_err();
        assert!(matches!(err, ShippingError::DeadlineExceeded));
        assert!(repo.is_empty());

        let err = svc.get_consignments(&ctx, GetRequest {}).await.unwrap_err();
        assert!(matches!(err, ShippingError::DeadlineExceeded));
    }

    #[test]
    fn test_response_json_shape() {
        let resp = Response {
            created: true,
            consignment: Some(sample("x1")),
            consignments: Vec::new(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["created"], true);
        assert_eq!(json["consignment"]["id"], "x1");
        assert_eq!(json["consignments"], serde_json::json!([]));
    }
}
