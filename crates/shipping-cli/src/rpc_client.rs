// crates/shipping-cli/src/rpc_client.rs
//
// Lightweight JSON-RPC client that POSTs envelopes to the shipping-daemon.

use serde::de::DeserializeOwned;
use serde::Serialize;

use shipping_rpc::{JsonRpcRequest, JsonRpcResponse, SERVICE_NAME};

use crate::error::CliError;

#[derive(Debug, Clone)]
pub struct RpcClient {
    url: String,
    http: reqwest::Client,
}

impl RpcClient {
    /// Build a client for the daemon at `endpoint` (e.g. `http://localhost:50051`).
    pub fn new(endpoint: &str) -> Self {
        Self {
            url: call_url(endpoint),
            http: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send a call and decode its result into `Resp`.
    pub async fn call<Req, Resp>(&self, method: &str, params: &Req) -> Result<Resp, CliError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let request = JsonRpcRequest {
            method: method.to_string(),
            params: serde_json::to_value(params)?,
        };

        let resp = self.http.post(&self.url).json(&request).send().await?;
        let rpc_response: JsonRpcResponse = resp.json().await?;
        into_result(rpc_response)
    }
}

/// Path of the single `Call` method on the daemon's tonic service.
fn call_url(endpoint: &str) -> String {
    format!("{}/{}/Call", endpoint.trim_end_matches('/'), SERVICE_NAME)
}

fn into_result<Resp: DeserializeOwned>(rpc_response: JsonRpcResponse) -> Result<Resp, CliError> {
    if !rpc_response.success {
        return Err(CliError::Rpc {
            code: rpc_response.code.unwrap_or_else(|| "unknown".to_string()),
            message: rpc_response.error.unwrap_or_default(),
        });
    }
    let result = rpc_response.result.unwrap_or(serde_json::Value::Null);
    Ok(serde_json::from_value(result)?)
}
