//! Prometheus metrics for the peer.
//!
//! Recording is always on; without an installed exporter the `metrics`
//! macros are no-ops. Set `PEER_METRICS_BIND` to expose a scrape endpoint.
//!
//! # Metrics
//!
//! - `chaincode_invocations_total{function,status}`
//! - `chaincode_invocation_duration_ms{function}`
//! - `chaincode_read_conflicts_total{function}`
//! - `world_state_height`, `world_state_keys`
//!
//! ```rust,no_run
//! use lc_peer::metrics;
//! use std::net::SocketAddr;
//!
//! let addr: SocketAddr = "127.0.0.1:9090".parse().unwrap();
//! metrics::init_metrics(addr).unwrap();
//! metrics::invocations_total("lottery", "OK");
//! ```

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Install the Prometheus exporter with an HTTP listener on `addr`
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

// ============================================================================
// Invocation Metrics
// ============================================================================

/// Count one finished invocation
pub fn invocations_total(function: &str, status: &str) {
    metrics::counter!("chaincode_invocations_total",
        "function" => function.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record invocation duration in milliseconds, retries included
pub fn invocation_duration_ms(function: &str, duration_ms: f64) {
    metrics::histogram!("chaincode_invocation_duration_ms",
        "function" => function.to_string()
    )
    .record(duration_ms);
}

/// Count one MVCC read conflict
pub fn read_conflicts_total(function: &str) {
    metrics::counter!("chaincode_read_conflicts_total",
        "function" => function.to_string()
    )
    .increment(1);
}

// ============================================================================
// World State Metrics
// ============================================================================

pub fn world_state_height(height: u64) {
    metrics::gauge!("world_state_height").set(height as f64);
}

pub fn world_state_keys(count: usize) {
    metrics::gauge!("world_state_keys").set(count as f64);
}
