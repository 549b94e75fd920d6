//! Chaincode configuration.
//!
//! The defaults are the values the chaincode has always shipped with; the
//! environment can override them for test networks.

use crate::ledger::Balance;
use thiserror::Error;

/// Default key of the shared pool record
pub const DEFAULT_POOL_KEY: &str = "total";

/// Default minimum pool accepted by `init` and reported healthy by `query`
pub const DEFAULT_MINIMUM_POOL: Balance = 100;

/// Default balance granted by `create_user`
pub const DEFAULT_INITIAL_BALANCE: Balance = 1000;

/// Chaincode configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChaincodeConfig {
    /// Key of the shared pool record
    pub pool_key: String,

    /// Smallest pool `init` accepts; `query()` reports `true` at or above it
    pub minimum_pool: Balance,

    /// Balance written for a newly registered account
    pub initial_balance: Balance,
}

impl ChaincodeConfig {
    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `CHAINCODE_POOL_KEY`: Pool record key (default: total)
    /// - `CHAINCODE_MINIMUM_POOL`: Minimum pool value (default: 100)
    /// - `CHAINCODE_INITIAL_BALANCE`: New account balance (default: 1000)
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse_or = |key: &str, default: Balance| {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };

        Self {
            pool_key: lookup("CHAINCODE_POOL_KEY")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_POOL_KEY.to_string()),
            minimum_pool: parse_or("CHAINCODE_MINIMUM_POOL", DEFAULT_MINIMUM_POOL),
            initial_balance: parse_or("CHAINCODE_INITIAL_BALANCE", DEFAULT_INITIAL_BALANCE),
        }
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_key.is_empty() {
            return Err(ConfigError::Invalid {
                var: "CHAINCODE_POOL_KEY".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.minimum_pool < 0 {
            return Err(ConfigError::Invalid {
                var: "CHAINCODE_MINIMUM_POOL".to_string(),
                reason: "Must not be negative".to_string(),
            });
        }

        if self.initial_balance < 0 {
            return Err(ConfigError::Invalid {
                var: "CHAINCODE_INITIAL_BALANCE".to_string(),
                reason: "Must not be negative".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for ChaincodeConfig {
    fn default() -> Self {
        Self {
            pool_key: DEFAULT_POOL_KEY.to_string(),
            minimum_pool: DEFAULT_MINIMUM_POOL,
            initial_balance: DEFAULT_INITIAL_BALANCE,
        }
    }
}

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ChaincodeConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ChaincodeConfig::default());
        assert_eq!(config.pool_key, "total");
        assert_eq!(config.minimum_pool, 100);
        assert_eq!(config.initial_balance, 1000);
    }

    #[test]
    fn test_overrides() {
        let config = ChaincodeConfig::from_lookup(lookup(&[
            ("CHAINCODE_POOL_KEY", "jackpot"),
            ("CHAINCODE_MINIMUM_POOL", "500"),
            ("CHAINCODE_INITIAL_BALANCE", "50"),
        ]));
        assert_eq!(config.pool_key, "jackpot");
        assert_eq!(config.minimum_pool, 500);
        assert_eq!(config.initial_balance, 50);
    }

    #[test]
    fn test_garbage_falls_back() {
        let config = ChaincodeConfig::from_lookup(lookup(&[
            ("CHAINCODE_POOL_KEY", ""),
            ("CHAINCODE_MINIMUM_POOL", "lots"),
        ]));
        assert_eq!(config.pool_key, DEFAULT_POOL_KEY);
        assert_eq!(config.minimum_pool, DEFAULT_MINIMUM_POOL);
    }

    #[test]
    fn test_validation_rejects_negative_minimum() {
        let config = ChaincodeConfig {
            minimum_pool: -1,
            ..ChaincodeConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("CHAINCODE_MINIMUM_POOL"));
    }

    #[test]
    fn test_validation_rejects_empty_pool_key() {
        let config = ChaincodeConfig {
            pool_key: String::new(),
            ..ChaincodeConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
