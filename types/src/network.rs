//! Network identifier and node endpoint defaults.

use serde::{Deserialize, Serialize};

/// Default HTTP RPC port.
pub const DEFAULT_HTTP_PORT: u16 = 9595;

/// Default WebSocket RPC port.
pub const DEFAULT_WS_PORT: u16 = 9596;

/// IPC socket file name.
pub const IPC_SOCKET_NAME: &str = "gur.ipc";

/// Identifies which UR network a node is connected to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkId {
    /// The production network.
    Live,
    /// The public test network.
    Test,
    /// Local development network.
    Dev,
}

impl NetworkId {
    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Test => "test",
            Self::Dev => "dev",
        }
    }

    /// Genesis timestamp (seconds) for this network.
    pub fn genesis_timestamp(&self) -> u64 {
        match self {
            // 2016-11-01 00:00:00 UTC
            Self::Live => 1_477_958_400,
            // 2016-09-01 00:00:00 UTC
            Self::Test => 1_472_688_000,
            Self::Dev => 0,
        }
    }
}

impl Default for NetworkId {
    fn default() -> Self {
        Self::Dev
    }
}
