// crates/shipping-daemon/src/config.rs
//
// Runtime configuration for the shipping daemon.
// Loaded from a TOML file or populated with sensible defaults.

use serde::Deserialize;
use std::fs;
use std::io;

use shipping_rpc::RpcConfig;

use crate::error::DaemonError;

/// Runtime configuration for the daemon.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DaemonConfig {
    /// Host address for the RPC server.
    #[serde(default = "default_rpc_host")]
    pub rpc_host: String,

    /// Port for the RPC server.
    #[serde(default = "default_rpc_port")]
    pub rpc_port: u16,

    /// Log level: "trace", "debug", "info", "warn", "error".
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Optional JSON file of consignments loaded into the repository at startup.
    #[serde(default)]
    pub seed_file: Option<String>,
}

fn default_rpc_host() -> String {
    "127.0.0.1".to_string()
}

fn default_rpc_port() -> u16 {
    50051
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            rpc_host: default_rpc_host(),
            rpc_port: default_rpc_port(),
            log_level: default_log_level(),
            seed_file: None,
        }
    }
}

impl DaemonConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, DaemonError> {
        let contents = fs::read_to_string(path).map_err(|source| DaemonError::ReadFile {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load configuration, falling back to defaults only when the file does
    /// not exist. Unreadable or malformed files are errors.
    ///
    /// The returned flag is true when the file was found.
    pub fn load_or_default(path: &str) -> Result<(Self, bool), DaemonError> {
        match Self::load(path) {
            Ok(config) => Ok((config, true)),
            Err(DaemonError::ReadFile { source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                Ok((Self::default(), false))
            }
            Err(e) => Err(e),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, DaemonError> {
        Ok(toml::from_str(contents)?)
    }

    /// RPC server settings derived from this config.
    pub fn rpc_config(&self) -> RpcConfig {
        RpcConfig {
            host: self.rpc_host.clone(),
            port: self.rpc_port,
        }
    }
}

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}/{}", home.display(), rest);
        }
    }
    path.to_string()
}
