//! Account registration.

use super::{Balance, BalanceLedger};
use crate::config::ChaincodeConfig;
use crate::errors::{ChaincodeError, ChaincodeResult};
use crate::state::StateStore;
use log::info;

/// Creates accounts with the configured opening balance
pub struct AccountRegistry<'c> {
    config: &'c ChaincodeConfig,
}

impl<'c> AccountRegistry<'c> {
    pub fn new(config: &'c ChaincodeConfig) -> Self {
        Self { config }
    }

    /// Register `id` unless it already holds a readable balance
    ///
    /// An absent key, a non-numeric value and a negative value all count as
    /// "no account" and are overwritten with the opening balance. A fault in
    /// the store itself is not treated as "no account": it is returned and
    /// nothing is written.
    ///
    /// # Returns
    ///
    /// * `ChaincodeResult<Balance>` - The opening balance
    ///
    /// # Errors
    ///
    /// * `ChaincodeError::AlreadyExists` - `id` holds a non-negative balance
    /// * `ChaincodeError::State` - The store failed
    pub fn create_user(&self, store: &mut dyn StateStore, id: &str) -> ChaincodeResult<Balance> {
        let mut ledger = BalanceLedger::new(store);

        match ledger.get(id) {
            Ok(balance) if balance >= 0 => {
                return Err(ChaincodeError::AlreadyExists { id: id.to_string() });
            }
            Ok(_) => {}
            Err(err) if err.is_unreadable() => {}
            Err(err) => return Err(err),
        }

        ledger.set(id, self.config.initial_balance)?;
        info!("registered {id} with {}", self.config.initial_balance);
        Ok(self.config.initial_balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{MemoryStore, StateError, StateResult};

    struct BrokenStore;

    impl StateStore for BrokenStore {
        fn get_state(&self, _key: &str) -> StateResult<Option<Vec<u8>>> {
            Err(StateError::Backend("unavailable".into()))
        }

        fn put_state(&mut self, _key: &str, _value: Vec<u8>) -> StateResult<()> {
            Err(StateError::Backend("unavailable".into()))
        }
    }

    #[test]
    fn test_create_new_account() {
        let config = ChaincodeConfig::default();
        let mut store = MemoryStore::new();
        let balance = AccountRegistry::new(&config)
            .create_user(&mut store, "alice")
            .unwrap();
        assert_eq!(balance, 1000);
        assert_eq!(store.get_state("alice").unwrap(), Some(b"1000".to_vec()));
    }

    #[test]
    fn test_existing_account_rejected() {
        let config = ChaincodeConfig::default();
        let mut store: MemoryStore = [("alice", "0")].into_iter().collect();
        let err = AccountRegistry::new(&config)
            .create_user(&mut store, "alice")
            .unwrap_err();
        assert_eq!(err, ChaincodeError::AlreadyExists { id: "alice".into() });
        assert_eq!(store.get_state("alice").unwrap(), Some(b"0".to_vec()));
    }

    #[test]
    fn test_unreadable_or_negative_value_is_replaced() {
        let config = ChaincodeConfig::default();
        let mut store: MemoryStore = [("garbled", "xyz"), ("negative", "-3")]
            .into_iter()
            .collect();
        let registry = AccountRegistry::new(&config);
        assert_eq!(registry.create_user(&mut store, "garbled").unwrap(), 1000);
        assert_eq!(registry.create_user(&mut store, "negative").unwrap(), 1000);
    }

    #[test]
    fn test_store_fault_propagates() {
        let config = ChaincodeConfig::default();
        let err = AccountRegistry::new(&config)
            .create_user(&mut BrokenStore, "alice")
            .unwrap_err();
        assert!(matches!(err, ChaincodeError::State(StateError::Backend(_))));
    }

    #[test]
    fn test_configured_opening_balance() {
        let config = ChaincodeConfig {
            initial_balance: 25,
            ..ChaincodeConfig::default()
        };
        let mut store = MemoryStore::new();
        assert_eq!(
            AccountRegistry::new(&config)
                .create_user(&mut store, "carol")
                .unwrap(),
            25
        );
    }
}
