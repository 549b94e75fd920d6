//! Transaction overlay that buffers one invocation's writes.

use super::{StateResult, StateStore, validate_key};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

/// Keys read from the base store during one invocation
pub type ReadSet = BTreeSet<String>;

/// Values written during one invocation, applied together on commit
pub type WriteSet = BTreeMap<String, Vec<u8>>;

/// Read-your-writes overlay over a base store.
///
/// Nothing reaches the base store until the write set is applied, so an
/// invocation that fails part way leaves the base untouched.
pub struct TxStore<'a> {
    base: &'a dyn StateStore,
    reads: RefCell<ReadSet>,
    writes: WriteSet,
}

impl<'a> TxStore<'a> {
    /// Open an overlay over `base`
    pub fn new(base: &'a dyn StateStore) -> Self {
        Self {
            base,
            reads: RefCell::new(ReadSet::new()),
            writes: WriteSet::new(),
        }
    }

    /// Keys that fell through to the base store
    pub fn read_set(&self) -> ReadSet {
        self.reads.borrow().clone()
    }

    /// Buffered writes
    pub fn write_set(&self) -> &WriteSet {
        &self.writes
    }

    /// Consume the overlay, returning both sets
    pub fn into_sets(self) -> (ReadSet, WriteSet) {
        (self.reads.into_inner(), self.writes)
    }

    /// Consume the overlay, returning the buffered writes
    pub fn into_write_set(self) -> WriteSet {
        self.writes
    }

    /// Apply a write set to `store` in key order
    pub fn apply(store: &mut dyn StateStore, writes: WriteSet) -> StateResult<()> {
        for (key, value) in writes {
            store.put_state(&key, value)?;
        }
        Ok(())
    }
}

impl StateStore for TxStore<'_> {
    fn get_state(&self, key: &str) -> StateResult<Option<Vec<u8>>> {
        if let Some(value) = self.writes.get(key) {
            return Ok(Some(value.clone()));
        }
        self.reads.borrow_mut().insert(key.to_string());
        self.base.get_state(key)
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> StateResult<()> {
        validate_key(key)?;
        self.writes.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{MemoryStore, StateError};

    fn base() -> MemoryStore {
        [("total", "1000"), ("alice", "50")].into_iter().collect()
    }

    #[test]
    fn test_writes_stay_buffered() {
        let base = base();
        let mut tx = TxStore::new(&base);
        tx.put_state("alice", b"0".to_vec()).unwrap();

        assert_eq!(tx.get_state("alice").unwrap(), Some(b"0".to_vec()));
        assert_eq!(base.get_state("alice").unwrap(), Some(b"50".to_vec()));
    }

    #[test]
    fn test_read_set_excludes_own_writes() {
        let base = base();
        let mut tx = TxStore::new(&base);
        tx.put_state("bob", b"1000".to_vec()).unwrap();
        tx.get_state("bob").unwrap();
        tx.get_state("total").unwrap();
        tx.get_state("missing").unwrap();

        let (reads, writes) = tx.into_sets();
        assert_eq!(
            reads.into_iter().collect::<Vec<_>>(),
            vec!["missing".to_string(), "total".to_string()]
        );
        assert_eq!(writes.len(), 1);
    }

    #[test]
    fn test_apply_write_set() {
        let mut base = base();
        let writes = {
            let mut tx = TxStore::new(&base);
            tx.put_state("alice", b"25".to_vec()).unwrap();
            tx.put_state("total", b"1025".to_vec()).unwrap();
            tx.into_write_set()
        };

        TxStore::apply(&mut base, writes).unwrap();
        assert_eq!(base.get_state("alice").unwrap(), Some(b"25".to_vec()));
        assert_eq!(base.get_state("total").unwrap(), Some(b"1025".to_vec()));
    }

    #[test]
    fn test_empty_key_rejected_in_overlay() {
        let base = base();
        let mut tx = TxStore::new(&base);
        assert!(matches!(
            tx.put_state("", b"1".to_vec()),
            Err(StateError::InvalidKey(_))
        ));
        assert!(tx.write_set().is_empty());
    }
}
