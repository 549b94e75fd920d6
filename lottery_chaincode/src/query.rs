//! Read-only views of the pool and of account balances.

use crate::config::ChaincodeConfig;
use crate::errors::{ChaincodeError, ChaincodeResult};
use crate::ledger::{Balance, BalanceLedger};
use crate::state::StateStore;

/// Read-only queries
pub struct QueryService<'c> {
    config: &'c ChaincodeConfig,
}

impl<'c> QueryService<'c> {
    pub fn new(config: &'c ChaincodeConfig) -> Self {
        Self { config }
    }

    /// Whether the pool holds at least the configured minimum
    ///
    /// # Errors
    ///
    /// * `ChaincodeError::PoolUnavailable` - Pool record missing or unreadable
    pub fn pool_status(&self, store: &mut dyn StateStore) -> ChaincodeResult<bool> {
        let pool = BalanceLedger::new(store)
            .get(&self.config.pool_key)
            .map_err(|err| ChaincodeError::PoolUnavailable(Box::new(err)))?;
        Ok(pool >= self.config.minimum_pool)
    }

    /// Balance of `id`
    pub fn balance(&self, store: &mut dyn StateStore, id: &str) -> ChaincodeResult<Balance> {
        BalanceLedger::new(store).get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryStore;

    #[test]
    fn test_pool_status_threshold() {
        let config = ChaincodeConfig::default();
        let query = QueryService::new(&config);

        let mut healthy: MemoryStore = [("total", "100")].into_iter().collect();
        assert!(query.pool_status(&mut healthy).unwrap());

        let mut drained: MemoryStore = [("total", "99")].into_iter().collect();
        assert!(!query.pool_status(&mut drained).unwrap());
    }

    #[test]
    fn test_pool_status_without_pool() {
        let config = ChaincodeConfig::default();
        let err = QueryService::new(&config)
            .pool_status(&mut MemoryStore::new())
            .unwrap_err();
        assert!(matches!(err, ChaincodeError::PoolUnavailable(_)));
    }

    #[test]
    fn test_balance_lookup() {
        let config = ChaincodeConfig::default();
        let query = QueryService::new(&config);
        let mut store: MemoryStore = [("alice", "42")].into_iter().collect();
        assert_eq!(query.balance(&mut store, "alice").unwrap(), 42);
        assert_eq!(
            query.balance(&mut store, "bob").unwrap_err().client_message(),
            "get balance error!"
        );
    }
}
