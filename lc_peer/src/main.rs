//! Single-node peer serving the lottery chaincode over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Error};
use lc_peer::{PeerConfig, api, logging, metrics, peer::Peer};
use lottery_chaincode::Chaincode;
use pico_args::Arguments;
use tracing::info;

const HELP: &str = "\
Run a single-node peer hosting the lottery chaincode

USAGE:
  lc_peer [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Peer socket bind address  [default: env PEER_BIND or 127.0.0.1:7051]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  PEER_BIND                  Peer bind address (e.g., 0.0.0.0:7051)
  PEER_MAX_ATTEMPTS          Simulations per invocation on read conflicts [default: 3]
  PEER_METRICS_BIND          Prometheus listener address [default: disabled]
  CHAINCODE_POOL_KEY         Pool record key [default: total]
  CHAINCODE_MINIMUM_POOL     Minimum pool for init [default: 100]
  CHAINCODE_INITIAL_BALANCE  Balance granted by create_user [default: 1000]
  RUST_LOG                   Log filter [default: info]
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind: Option<SocketAddr> = pargs
        .opt_value_from_str("--bind")
        .context("Invalid --bind address")?;

    logging::init();

    let config = PeerConfig::from_env(bind)?;
    config.validate()?;

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(|e| anyhow::anyhow!(e))?;
        info!("Prometheus metrics listening on {}", addr);
    }

    info!(
        "Chaincode: pool key '{}', minimum pool {}, initial balance {}",
        config.chaincode.pool_key, config.chaincode.minimum_pool, config.chaincode.initial_balance
    );

    let peer = Arc::new(Peer::new(
        Chaincode::new(config.chaincode.clone()),
        config.max_attempts,
    ));
    let app = api::create_router(api::AppState { peer });

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    info!(
        "Peer is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down peer...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install CTRL+C signal handler: {}", e);
        std::future::pending::<()>().await;
    }
}
