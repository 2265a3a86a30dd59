// crates/shipping-cli/src/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The daemon answered with `success: false`.
    #[error("RPC error ({code}): {message}")]
    Rpc { code: String, message: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid container spec '{0}', expected id:customer_id:origin:user_id")]
    InvalidContainer(String),
}
