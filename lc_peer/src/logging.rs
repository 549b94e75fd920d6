//! Structured logging for the peer.
//!
//! The chaincode library logs through the `log` facade; the subscriber
//! installed here picks those records up alongside the peer's own spans.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber
///
/// Log levels are read from `RUST_LOG`, defaulting to
/// `info,hyper=warn,tower_http=warn`.
///
/// # Example
///
/// ```no_run
/// use lc_peer::logging;
///
/// #[tokio::main]
/// async fn main() {
///     logging::init();
///     tracing::info!("Peer starting");
/// }
/// ```
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,tower_http=warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}

/// Log a finished invocation
///
/// # Arguments
///
/// * `tx_id` - Transaction id
/// * `function` - Invoked function (`init` for pool seeding)
/// * `status` - Final status
/// * `attempts` - Simulations run, retries included
/// * `duration_ms` - Wall time across all attempts
pub fn log_invocation(tx_id: &str, function: &str, status: &str, attempts: u32, duration_ms: u64) {
    if duration_ms > 1000 {
        tracing::warn!(
            tx_id = tx_id,
            function = function,
            status = status,
            attempts = attempts,
            duration_ms = duration_ms,
            "Slow invocation"
        );
    } else {
        tracing::info!(
            tx_id = tx_id,
            function = function,
            status = status,
            attempts = attempts,
            duration_ms = duration_ms,
            "Invocation finished"
        );
    }
}

/// Log an MVCC read conflict that forced a re-simulation
pub fn log_conflict(tx_id: &str, key: &str, attempt: u32) {
    tracing::warn!(
        tx_id = tx_id,
        key = key,
        attempt = attempt,
        "Read conflict, re-simulating"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_invocation() {
        // Just ensure it doesn't panic
        log_invocation("abc123", "lottery", "OK", 1, 3);
        log_invocation("abc123", "lottery", "ERROR", 3, 1500);
    }

    #[test]
    fn test_log_conflict() {
        log_conflict("abc123", "total", 2);
    }
}
