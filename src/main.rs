//! Gateway binary: load configuration, wire subsystems, serve.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use rpc_gateway::config::{load_config, GatewayConfig};
use rpc_gateway::http::GatewayServer;
use rpc_gateway::lifecycle::{signals, Shutdown};
use rpc_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(
    name = "rpc-gateway",
    about = "JSON-RPC gateway with circuit-breaker protected forwarding"
)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        tls = config.listener.tls.is_some(),
        upstream = %config.upstream.url,
        timeout_ms = config.upstream.request_timeout_ms,
        max_body_bytes = config.limits.max_body_bytes,
        breaker_enabled = config.circuit_breaker.enabled,
        "configuration loaded"
    );

    let prometheus = match metrics::init_prometheus() {
        Ok(handle) => Some(handle),
        Err(err) => {
            tracing::error!(error = %err, "failed to install Prometheus recorder");
            None
        }
    };

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "listening for connections");

    let server = GatewayServer::new(config, prometheus)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
