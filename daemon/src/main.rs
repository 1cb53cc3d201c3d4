//! UR daemon — entry point for running a UR node.

use clap::Parser;
use std::path::PathBuf;
use ur_ledger::GenesisConfig;
use ur_node::{NodeConfig, UrNode};
use ur_types::NetworkId;

/// CLI flags are all optional: a TOML config file (when given) is the base,
/// and only flags the user actually passed override it.
#[derive(Parser)]
#[command(name = "gur", about = "UR chain node daemon")]
struct Cli {
    /// Network to connect to: "live", "test", or "dev".
    #[arg(long, env = "UR_NETWORK")]
    network: Option<String>,

    /// Data directory for chain storage.
    #[arg(long, env = "UR_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Enable or disable the HTTP RPC server.
    #[arg(long, env = "UR_ENABLE_RPC")]
    rpc: Option<bool>,

    /// HTTP RPC port.
    #[arg(long, env = "UR_HTTP_PORT")]
    http_port: Option<u16>,

    /// Enable the WebSocket server.
    #[arg(long, env = "UR_ENABLE_WEBSOCKET")]
    websocket: bool,

    /// WebSocket RPC port.
    #[arg(long, env = "UR_WS_PORT")]
    ws_port: Option<u16>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "UR_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "UR_LOG_FORMAT")]
    log_format: Option<String>,

    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_network(s: &str) -> NetworkId {
    match s.to_lowercase().as_str() {
        "live" => NetworkId::Live,
        "test" => NetworkId::Test,
        _ => NetworkId::Dev,
    }
}

/// Layer the CLI flags over the base config (file or defaults).
fn merge_config(cli: Cli, base: NodeConfig) -> NodeConfig {
    NodeConfig {
        network: cli.network.as_deref().map(parse_network).unwrap_or(base.network),
        data_dir: cli.data_dir.unwrap_or_else(|| base.data_dir.clone()),
        enable_rpc: cli.rpc.unwrap_or(base.enable_rpc),
        http_port: cli.http_port.unwrap_or(base.http_port),
        enable_websocket: cli.websocket || base.enable_websocket,
        ws_port: cli.ws_port.unwrap_or(base.ws_port),
        log_level: cli.log_level.unwrap_or_else(|| base.log_level.clone()),
        log_format: cli.log_format.unwrap_or_else(|| base.log_format.clone()),
        ..base
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Read the config file before the subscriber exists; diagnostics are
    // held back and emitted once logging is up.
    let mut load_note: Option<String> = None;
    let mut load_warning: Option<String> = None;
    let file_config: Option<NodeConfig> = match &cli.config {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<NodeConfig>(&contents) {
                Ok(cfg) => {
                    load_note = Some(format!("Loaded config from {}", path.display()));
                    Some(cfg)
                }
                Err(e) => {
                    load_warning =
                        Some(format!("Failed to parse config file: {e}, using CLI defaults"));
                    None
                }
            },
            Err(e) => {
                load_warning = Some(format!(
                    "Failed to read config file {}: {e}, using CLI defaults",
                    path.display()
                ));
                None
            }
        },
        None => None,
    };

    let config = merge_config(cli, file_config.unwrap_or_default());

    ur_utils::init_tracing(&config.log_level, &config.log_format);
    if let Some(warning) = load_warning {
        tracing::warn!("{warning}");
    }
    if let Some(note) = load_note {
        tracing::info!("{note}");
    }

    tracing::info!(
        "Starting UR node on {} network (HTTP:{}, WS:{}, IPC:{})",
        config.network.as_str(),
        if config.enable_rpc {
            config.http_port.to_string()
        } else {
            "off".into()
        },
        if config.enable_websocket {
            config.ws_port.to_string()
        } else {
            "off".into()
        },
        config.ipc_path().display(),
    );

    // The genesis for live/test networks ships with the release; the dev
    // network uses the well-known single-privileged-sender setup.
    let genesis = GenesisConfig::default_dev();
    let node = UrNode::new(config, genesis)?;
    tracing::info!(
        head = node.head().number,
        n_signups = %node.head().n_signups,
        total_wei = %node.head().total_wei,
        "node running"
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received — stopping node");
    tracing::info!("UR daemon exited cleanly");
    Ok(())
}
