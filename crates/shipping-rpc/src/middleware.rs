// crates/shipping-rpc/src/middleware.rs
//
// Request interceptor for the RPC server.

use tonic::{Request, Status};

/// Logging interceptor for tonic gRPC requests.
///
/// Logs the metadata of each incoming request at debug level. Never rejects.
pub fn logging_interceptor(req: Request<()>) -> Result<Request<()>, Status> {
    tracing::debug!(
        user_agent = req
            .metadata()
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-"),
        "Incoming RPC request: {:?}",
        req.metadata()
    );
    Ok(req)
}
