//! Peer configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use lottery_chaincode::ChaincodeConfig;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Default peer listen address
pub const DEFAULT_BIND: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 7051);

/// Default number of simulations per invocation before giving up on conflicts
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Complete peer configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct PeerConfig {
    /// HTTP bind address
    pub bind: SocketAddr,
    /// Simulation attempts per invocation
    pub max_attempts: u32,
    /// Prometheus listener, disabled when unset
    pub metrics_bind: Option<SocketAddr>,
    /// Chaincode settings
    pub chaincode: ChaincodeConfig,
}

impl PeerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if an address variable is set but does not parse
    pub fn from_env(bind_override: Option<SocketAddr>) -> Result<Self, ConfigError> {
        Self::from_lookup(bind_override, |key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(bind_override: Option<SocketAddr>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = match bind_override {
            Some(addr) => addr,
            None => parse_addr(&lookup, "PEER_BIND")?.unwrap_or(DEFAULT_BIND),
        };

        Ok(PeerConfig {
            bind,
            max_attempts: parse_or(&lookup, "PEER_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS),
            metrics_bind: parse_addr(&lookup, "PEER_METRICS_BIND")?,
            chaincode: ChaincodeConfig::from_lookup(&lookup),
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                var: "PEER_MAX_ATTEMPTS".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        if self.metrics_bind == Some(self.bind) {
            return Err(ConfigError::Invalid {
                var: "PEER_METRICS_BIND".to_string(),
                reason: format!("Must differ from the peer bind address ({})", self.bind),
            });
        }

        self.chaincode.validate()?;
        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },

    #[error(transparent)]
    Chaincode(#[from] lottery_chaincode::ConfigError),
}

/// Helper to parse a variable with default fallback
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_addr<F>(lookup: &F, key: &str) -> Result<Option<SocketAddr>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .map(|v| {
            v.trim().parse().map_err(|_| ConfigError::Invalid {
                var: key.to_string(),
                reason: format!("'{v}' is not an IP:PORT address"),
            })
        })
        .transpose()
}
