//! Pool initialisation.

use crate::config::ChaincodeConfig;
use crate::errors::{ChaincodeResult, ValidationError};
use crate::ledger::{Balance, BalanceLedger};
use crate::state::StateStore;
use log::info;

/// Seeds the shared pool
pub struct Initializer<'c> {
    config: &'c ChaincodeConfig,
}

impl<'c> Initializer<'c> {
    pub fn new(config: &'c ChaincodeConfig) -> Self {
        Self { config }
    }

    /// Write the pool from the single `init` argument
    ///
    /// Running it again overwrites the pool.
    ///
    /// # Errors
    ///
    /// * `ValidationError::InitArguments` - Not exactly one argument
    /// * `ValidationError::InitNotInteger` - Argument is not an integer
    /// * `ValidationError::InitBelowMinimum` - Value below `minimum_pool`
    pub fn init(&self, store: &mut dyn StateStore, args: &[String]) -> ChaincodeResult<Balance> {
        let [sum] = args else {
            return Err(ValidationError::InitArguments { got: args.len() }.into());
        };

        let value: Balance = sum
            .parse()
            .map_err(|_| ValidationError::InitNotInteger(sum.clone()))?;

        if value < self.config.minimum_pool {
            return Err(ValidationError::InitBelowMinimum {
                value,
                minimum: self.config.minimum_pool,
            }
            .into());
        }

        BalanceLedger::new(store).set(&self.config.pool_key, value)?;
        info!("pool {} initialised to {value}", self.config.pool_key);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ChaincodeError;
    use crate::state::MemoryStore;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_init_writes_canonical_pool() {
        let config = ChaincodeConfig::default();
        let mut store = MemoryStore::new();
        let value = Initializer::new(&config)
            .init(&mut store, &args(&["+250"]))
            .unwrap();
        assert_eq!(value, 250);
        assert_eq!(store.get_state("total").unwrap(), Some(b"250".to_vec()));
    }

    #[test]
    fn test_init_boundary() {
        let config = ChaincodeConfig::default();
        let init = Initializer::new(&config);
        let mut store = MemoryStore::new();
        assert!(init.init(&mut store, &args(&["100"])).is_ok());

        let err = init.init(&mut store, &args(&["99"])).unwrap_err();
        assert_eq!(err.client_message(), "init value must bigger than 100");
        assert_eq!(store.get_state("total").unwrap(), Some(b"100".to_vec()));
    }

    #[test]
    fn test_init_argument_errors() {
        let config = ChaincodeConfig::default();
        let init = Initializer::new(&config);
        let mut store = MemoryStore::new();

        assert_eq!(
            init.init(&mut store, &[]).unwrap_err(),
            ChaincodeError::Validation(ValidationError::InitArguments { got: 0 })
        );
        assert_eq!(
            init.init(&mut store, &args(&["1", "2"]))
                .unwrap_err()
                .client_message(),
            "Incorrect number of arguments. Expecting 1"
        );
        assert_eq!(
            init.init(&mut store, &args(&["lots"]))
                .unwrap_err()
                .client_message(),
            "Expecting integer value for sum"
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_reinit_overwrites() {
        let config = ChaincodeConfig::default();
        let init = Initializer::new(&config);
        let mut store = MemoryStore::new();
        init.init(&mut store, &args(&["5000"])).unwrap();
        init.init(&mut store, &args(&["200"])).unwrap();
        assert_eq!(store.get_state("total").unwrap(), Some(b"200".to_vec()));
    }
}
