// crates/shipping-rpc/src/server.rs
//
// RPC server setup: ShippingRpcServer and RpcConfig.
//
// Uses a JSON-RPC-over-gRPC approach. A single tonic unary service accepts
// JSON-encoded requests with a method field, dispatches to the shipping
// service, and returns JSON-encoded responses. No protobuf codegen is needed;
// tonic still provides the transport, HTTP/2, and interceptors.

use std::future::Future;
use std::net::{AddrParseError, SocketAddr};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use http::header::{HeaderValue, CONTENT_TYPE};
use http_body::Body as HttpBody;
use http_body_util::{BodyExt, Limited};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tonic::transport::Server;
use tonic::Status;

use shipping_core::consignment::Consignment;
use shipping_core::error::ShippingError;
use shipping_core::traits::ConsignmentRepository;

use crate::context::CallContext;
use crate::handlers;
use crate::handlers::consignment::{GetRequest, ShippingService};
use crate::middleware;

/// Fully qualified gRPC service name. Requests go to `/{SERVICE_NAME}/Call`.
pub const SERVICE_NAME: &str = "consignment.ShippingService";

/// Methods accepted in the request envelope.
pub const METHODS: &[&str] = &[
    "CreateConsignment",
    "GetConsignments",
    "Health",
    "ListMethods",
];

/// Callback returning the number of stored consignments without copying them.
pub type CountHook = Arc<dyn Fn() -> usize + Send + Sync>;

/// Largest request body accepted, matching gRPC's default receive limit.
const MAX_REQUEST_BYTES: usize = 4 * 1024 * 1024;

// ---------------------------------------------------------------------------
// RpcConfig
// ---------------------------------------------------------------------------

/// Configuration for the RPC server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcConfig {
    /// Host to bind to (e.g., "127.0.0.1" or "0.0.0.0").
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 50051,
        }
    }
}

impl RpcConfig {
    /// Parse `host:port` into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|source| ServerError::InvalidAddress { addr, source })
    }
}

/// Errors raised while starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid listen address {addr}: {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),
}

// ---------------------------------------------------------------------------
// JSON-RPC Envelope
// ---------------------------------------------------------------------------

/// A JSON-RPC-style request envelope.
/// The client sends a method name and a JSON params payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// The RPC method to invoke (e.g., "CreateConsignment").
    pub method: String,
    /// JSON-encoded parameters for the method. Missing means `{}`.
    #[serde(default)]
    pub params: serde_json::Value,
}

/// A JSON-RPC-style response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Whether the request succeeded.
    pub success: bool,
    /// The result data (if success).
    pub result: Option<serde_json::Value>,
    /// Error message (if not success).
    pub error: Option<String>,
    /// Machine-readable error code (if not success).
    #[serde(default)]
    pub code: Option<String>,
}

impl JsonRpcResponse {
    fn ok(value: serde_json::Value) -> Self {
        Self {
            success: true,
            result: Some(value),
            error: None,
            code: None,
        }
    }

    fn failure(code: &str, message: String) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(message),
            code: Some(code.to_string()),
        }
    }
}

impl From<ShippingError> for JsonRpcResponse {
    fn from(e: ShippingError) -> Self {
        Self::failure(e.code(), e.to_string())
    }
}

// ---------------------------------------------------------------------------
// ShippingRpcServer
// ---------------------------------------------------------------------------

/// The main RPC server for the shipping service.
///
/// Wraps a `ShippingService` built over the injected repository and exposes
/// it through a tonic server with JSON-RPC dispatching.
#[derive(Clone)]
pub struct ShippingRpcServer {
    /// Server configuration.
    config: RpcConfig,
    service: ShippingService,
    /// Server construction time, for uptime in Health.
    start_time: Instant,
    started_at: DateTime<Utc>,
    /// Optional fast path for the Health consignment count.
    count_hook: Option<CountHook>,
}

impl std::fmt::Debug for ShippingRpcServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShippingRpcServer")
            .field("config", &self.config)
            .field("started_at", &self.started_at)
            .field("count_hook", &self.count_hook.is_some())
            .finish()
    }
}

impl ShippingRpcServer {
    /// Create a new ShippingRpcServer.
    ///
    /// # Arguments
    /// * `config` - Server configuration (host, port).
    /// * `repo` - Repository backing the shipping service.
    pub fn new(config: RpcConfig, repo: Arc<dyn ConsignmentRepository>) -> Self {
        Self {
            config,
            service: ShippingService::new(repo),
            start_time: Instant::now(),
            started_at: Utc::now(),
            count_hook: None,
        }
    }

    /// Set a callback that Health uses to count consignments.
    ///
    /// Without one, Health counts a full snapshot from the repository.
    pub fn with_count_hook(mut self, hook: CountHook) -> Self {
        self.count_hook = Some(hook);
        self
    }

    /// Build the tonic service without binding a listener.
    pub fn json_rpc_service(&self) -> ShippingJsonRpcServer {
        ShippingJsonRpcServer::new(ShippingServiceImpl {
            service: self.service.clone(),
            start_time: self.start_time,
            started_at: self.started_at,
            count_hook: self.count_hook.clone(),
        })
    }

    /// Start the RPC server and serve until `signal` resolves.
    pub async fn start_with_shutdown<F>(&self, signal: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send,
    {
        let addr = self.config.socket_addr()?;

        tracing::info!("Shipping RPC server starting on {}", addr);

        Server::builder()
            .accept_http1(true)
            .add_service(tonic::service::interceptor::InterceptedService::new(
                self.json_rpc_service(),
                middleware::logging_interceptor,
            ))
            .serve_with_shutdown(addr, signal)
            .await?;

        tracing::info!("Shipping RPC server stopped");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Holds the shipping service and dispatches JSON-RPC calls to it.
#[derive(Clone)]
struct ShippingServiceImpl {
    service: ShippingService,
    start_time: Instant,
    started_at: DateTime<Utc>,
    count_hook: Option<CountHook>,
}

impl ShippingServiceImpl {
    /// Dispatch a JSON-RPC request to the appropriate handler based on the method name.
    async fn dispatch(&self, ctx: CallContext, request: JsonRpcRequest) -> JsonRpcResponse {
        let service = &self.service;

        let result = match request.method.as_str() {
            "CreateConsignment" => {
                dispatch_handler(request.params, |r: Consignment| {
                    service.create_consignment(&ctx, r)
                })
                .await
            }
            "GetConsignments" => {
                dispatch_handler(request.params, |r: GetRequest| {
                    service.get_consignments(&ctx, r)
                })
                .await
            }
            "Health" => {
                dispatch_handler(request.params, |r| {
                    handlers::node::handle_get_health(
                        r,
                        service,
                        self.count_hook.as_ref(),
                        self.start_time,
                        self.started_at,
                    )
                })
                .await
            }
            "ListMethods" => {
                dispatch_handler(request.params, |r| {
                    handlers::node::handle_list_methods(r, SERVICE_NAME, METHODS)
                })
                .await
            }
            _ => {
                tracing::warn!("Unknown method: {}", request.method);
                return JsonRpcResponse::failure(
                    "unknown_method",
                    format!("Unknown method: {}", request.method),
                );
            }
        };

        match result {
            Ok(value) => JsonRpcResponse::ok(value),
            Err(err) => err.into(),
        }
    }
}

/// Generic dispatch helper: deserialize params into a request type,
/// call the handler, and serialize the result to JSON.
async fn dispatch_handler<Req, Resp, F, Fut>(
    params: serde_json::Value,
    handler: F,
) -> Result<serde_json::Value, ShippingError>
where
    Req: serde::de::DeserializeOwned,
    Resp: serde::Serialize,
    F: FnOnce(Req) -> Fut,
    Fut: Future<Output = Result<Resp, ShippingError>>,
{
    // Parameterless calls may send `null` or omit params entirely.
    let params = if params.is_null() {
        serde_json::json!({})
    } else {
        params
    };
    let request: Req = serde_json::from_value(params)
        .map_err(|e| ShippingError::InvalidRequest(e.to_string()))?;
    let response = handler(request).await?;
    Ok(serde_json::to_value(response)?)
}

// ---------------------------------------------------------------------------
// Tonic Service Wiring
// ---------------------------------------------------------------------------
// A single gRPC service with one method, `Call`. The request and response
// bodies are raw JSON (JsonRpcRequest / JsonRpcResponse).

/// The tonic service wrapper. Implements the low-level gRPC service
/// by accepting bytes, deserializing as JSON-RPC, and dispatching.
#[derive(Clone)]
pub struct ShippingJsonRpcServer {
    inner: ShippingServiceImpl,
}

impl std::fmt::Debug for ShippingJsonRpcServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShippingJsonRpcServer").finish()
    }
}

impl ShippingJsonRpcServer {
    fn new(inner: ShippingServiceImpl) -> Self {
        Self { inner }
    }
}

impl tonic::server::NamedService for ShippingJsonRpcServer {
    const NAME: &'static str = SERVICE_NAME;
}

impl<B> tower_service::Service<http::Request<B>> for ShippingJsonRpcServer
where
    B: HttpBody + Send + 'static,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>> + Send,
    B::Data: Send,
{
    type Response = http::Response<tonic::body::BoxBody>;
    type Error = std::convert::Infallible;
    type Future = std::pin::Pin<
        Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        let inner = self.inner.clone();

        Box::pin(async move {
            let ctx = CallContext::from_headers(req.headers());

            let body_bytes = match collect_body(req.into_body()).await {
                Ok(b) => b,
                Err(e) => {
                    tracing::error!("Failed to read request body: {}", e);
                    return Ok(build_response(&JsonRpcResponse::failure(
                        "invalid_request",
                        format!("Failed to read request body: {}", e),
                    )));
                }
            };

            let rpc_request: JsonRpcRequest = match serde_json::from_slice(&body_bytes) {
                Ok(r) => r,
                Err(e) => {
                    return Ok(build_response(&JsonRpcResponse::failure(
                        "invalid_request",
                        format!("Invalid JSON-RPC request: {}", e),
                    )));
                }
            };

            let rpc_response = inner.dispatch(ctx, rpc_request).await;
            Ok(build_response(&rpc_response))
        })
    }
}

/// Collect the body of an HTTP request into bytes, up to `MAX_REQUEST_BYTES`.
async fn collect_body<B>(body: B) -> Result<bytes::Bytes, String>
where
    B: HttpBody + Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    B::Data: Send,
{
    Limited::new(body, MAX_REQUEST_BYTES)
        .collect()
        .await
        .map(|collected| collected.to_bytes())
        .map_err(|e| e.to_string())
}

/// Build an HTTP response carrying the JSON-encoded envelope.
fn build_response(rpc_response: &JsonRpcResponse) -> http::Response<tonic::body::BoxBody> {
    let json = serde_json::to_vec(rpc_response).unwrap_or_default();
    let body = tonic::body::BoxBody::new(
        http_body_util::Full::new(bytes::Bytes::from(json))
            .map_err(|e| Status::internal(format!("body error: {}", e))),
    );

    let mut response = http::Response::new(body);
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}
