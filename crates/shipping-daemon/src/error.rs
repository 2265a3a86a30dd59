// crates/shipping-daemon/src/error.rs
//
// Startup errors for the daemon. All of them are fatal at boot.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid seed file: {0}")]
    Seed(#[from] serde_json::Error),
}
