//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use ur_types::network::{DEFAULT_HTTP_PORT, DEFAULT_WS_PORT, IPC_SOCKET_NAME};
use ur_types::NetworkId;

use crate::NodeError;

/// Configuration for a UR node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Which network to connect to.
    #[serde(default = "default_network")]
    pub network: NetworkId,

    /// Data directory for chain storage.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Whether to enable the HTTP RPC server.
    #[serde(default = "default_true")]
    pub enable_rpc: bool,

    /// HTTP RPC port.
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Whether to enable the WebSocket server.
    #[serde(default)]
    pub enable_websocket: bool,

    /// WebSocket RPC port.
    #[serde(default = "default_ws_port")]
    pub ws_port: u16,

    /// IPC socket file name, created inside the data directory.
    #[serde(default = "default_ipc_name")]
    pub ipc_name: String,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_network() -> NetworkId {
    NetworkId::Dev
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./ur_data")
}

fn default_true() -> bool {
    true
}

fn default_http_port() -> u16 {
    DEFAULT_HTTP_PORT
}

fn default_ws_port() -> u16 {
    DEFAULT_WS_PORT
}

fn default_ipc_name() -> String {
    IPC_SOCKET_NAME.to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, NodeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("NodeConfig is always serializable to TOML")
    }

    /// Full path of the IPC socket.
    pub fn ipc_path(&self) -> PathBuf {
        self.data_dir.join(&self.ipc_name)
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            data_dir: default_data_dir(),
            enable_rpc: default_true(),
            http_port: default_http_port(),
            enable_websocket: false,
            ws_port: default_ws_port(),
            ipc_name: default_ipc_name(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = NodeConfig::default();
        let toml_str = config.to_toml_string();
        let parsed = NodeConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.http_port, config.http_port);
        assert_eq!(parsed.ws_port, config.ws_port);
        assert_eq!(parsed.ipc_name, config.ipc_name);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = NodeConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.http_port, 9595);
        assert_eq!(config.ws_port, 9596);
        assert_eq!(config.ipc_name, "gur.ipc");
        assert_eq!(config.log_format, "human");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            http_port = 9999
            log_level = "debug"
        "#;
        let config = NodeConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.http_port, 9999);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.ws_port, 9596); // default
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = NodeConfig::from_toml_file("/nonexistent/gur.toml");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, NodeError::Config(_)));
    }

    #[test]
    fn ipc_path_joins_data_dir() {
        let config = NodeConfig::default();
        assert!(config.ipc_path().ends_with("gur.ipc"));
    }
}
