// crates/shipping-rpc/src/lib.rs
//
// shipping-rpc: gRPC/JSON-RPC server and handlers for the shipping
// consignment service.
//
// Provides a tonic-based RPC server exposing CreateConsignment and
// GetConsignments (plus Health and ListMethods). Requests travel as JSON
// envelopes over tonic rather than protobuf codegen.

pub mod context;
pub mod handlers;
pub mod middleware;
pub mod server;

// Re-export the main types for ergonomic access.
pub use context::CallContext;
pub use handlers::consignment::{GetRequest, Response, ShippingService};
pub use server::{
    CountHook, JsonRpcRequest, JsonRpcResponse, RpcConfig, ServerError, ShippingJsonRpcServer,
    ShippingRpcServer, SERVICE_NAME,
};
