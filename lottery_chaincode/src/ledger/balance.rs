//! Balance reads and adjustments.

use super::Balance;
use crate::errors::{ChaincodeError, ChaincodeResult};
use crate::state::StateStore;
use log::debug;

/// Render a balance the way it is stored
pub fn encode_balance(balance: Balance) -> Vec<u8> {
    balance.to_string().into_bytes()
}

/// Parse a stored balance
pub fn decode_balance(key: &str, raw: &[u8]) -> ChaincodeResult<Balance> {
    let text = String::from_utf8_lossy(raw);
    text.parse().map_err(|_| ChaincodeError::Parse {
        key: key.to_string(),
        value: text.into_owned(),
    })
}

/// Balance ledger over an injected state store
pub struct BalanceLedger<'a> {
    store: &'a mut dyn StateStore,
}

impl<'a> BalanceLedger<'a> {
    pub fn new(store: &'a mut dyn StateStore) -> Self {
        Self { store }
    }

    /// Read the balance stored under `key`
    ///
    /// # Errors
    ///
    /// * `ChaincodeError::NotFound` - Nothing stored under `key`
    /// * `ChaincodeError::Parse` - Stored value is not an integer
    pub fn get(&self, key: &str) -> ChaincodeResult<Balance> {
        let raw = self
            .store
            .get_state(key)?
            .ok_or_else(|| ChaincodeError::NotFound {
                key: key.to_string(),
            })?;
        decode_balance(key, &raw)
    }

    /// Overwrite the balance stored under `key`
    pub fn set(&mut self, key: &str, balance: Balance) -> ChaincodeResult<()> {
        self.store.put_state(key, encode_balance(balance))?;
        Ok(())
    }

    /// Apply `balance += delta` and persist the result
    ///
    /// # Returns
    ///
    /// * `ChaincodeResult<Balance>` - Balance after the adjustment
    ///
    /// # Errors
    ///
    /// * `ChaincodeError::InsufficientFunds` - Result would be negative; nothing is written
    /// * `ChaincodeError::Overflow` - Result leaves the balance range; nothing is written
    pub fn adjust(&mut self, key: &str, delta: Balance) -> ChaincodeResult<Balance> {
        let balance = self.get(key)?;
        let updated = balance
            .checked_add(delta)
            .ok_or_else(|| ChaincodeError::Overflow {
                key: key.to_string(),
            })?;

        if updated < 0 {
            return Err(ChaincodeError::InsufficientFunds {
                key: key.to_string(),
                balance,
                delta,
            });
        }

        self.set(key, updated)?;
        debug!("adjusted {key} by {delta}: {balance} -> {updated}");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryStore;

    fn store() -> MemoryStore {
        [("alice", "100"), ("garbage", "12ab"), ("total", "1000")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_get_existing() {
        let mut store = store();
        let ledger = BalanceLedger::new(&mut store);
        assert_eq!(ledger.get("alice").unwrap(), 100);
    }

    #[test]
    fn test_get_missing() {
        let mut store = store();
        let ledger = BalanceLedger::new(&mut store);
        assert_eq!(
            ledger.get("bob").unwrap_err(),
            ChaincodeError::NotFound { key: "bob".into() }
        );
    }

    #[test]
    fn test_get_non_numeric() {
        let mut store = store();
        let ledger = BalanceLedger::new(&mut store);
        assert!(matches!(
            ledger.get("garbage"),
            Err(ChaincodeError::Parse { value, .. }) if value == "12ab"
        ));
    }

    #[test]
    fn test_adjust_credit_and_debit() {
        let mut store = store();
        let mut ledger = BalanceLedger::new(&mut store);
        assert_eq!(ledger.adjust("alice", 50).unwrap(), 150);
        assert_eq!(ledger.adjust("alice", -150).unwrap(), 0);
        assert_eq!(store.get_state("alice").unwrap(), Some(b"0".to_vec()));
    }

    #[test]
    fn test_adjust_below_zero_leaves_state() {
        let mut store = store();
        let mut ledger = BalanceLedger::new(&mut store);
        let err = ledger.adjust("alice", -101).unwrap_err();
        assert_eq!(
            err,
            ChaincodeError::InsufficientFunds {
                key: "alice".into(),
                balance: 100,
                delta: -101
            }
        );
        assert_eq!(store.get_state("alice").unwrap(), Some(b"100".to_vec()));
    }

    #[test]
    fn test_adjust_overflow_leaves_state() {
        let mut store: MemoryStore = [("whale", i64::MAX.to_string())].into_iter().collect();
        let mut ledger = BalanceLedger::new(&mut store);
        assert!(matches!(
            ledger.adjust("whale", 1),
            Err(ChaincodeError::Overflow { .. })
        ));
        assert_eq!(ledger.get("whale").unwrap(), i64::MAX);
    }

    #[test]
    fn test_signed_and_canonical_encoding() {
        assert_eq!(decode_balance("k", b"+100").unwrap(), 100);
        assert_eq!(decode_balance("k", b"-5").unwrap(), -5);
        assert!(decode_balance("k", b" 5").is_err());
        assert!(decode_balance("k", b"").is_err());
        assert_eq!(encode_balance(100), b"100".to_vec());
    }
}
