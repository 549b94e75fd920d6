//! State store seam between the chaincode and its host ledger.
//!
//! The chaincode never touches global state. Every operation receives a
//! `&mut dyn StateStore` handle, which the host backs with its world state
//! and tests back with a [`MemoryStore`].
//!
//! [`TxStore`] layers a single invocation on top of any store: reads fall
//! through to the base (and are recorded in the read set), writes are
//! buffered in the write set until the host decides to apply them.
//!
//! ## Example
//!
//! ```
//! use lottery_chaincode::state::{MemoryStore, StateStore, TxStore};
//!
//! let mut store = MemoryStore::new();
//! store.put_state("total", b"1000".to_vec()).unwrap();
//!
//! let writes = {
//!     let mut tx = TxStore::new(&store);
//!     tx.put_state("alice", b"1000".to_vec()).unwrap();
//!     assert_eq!(tx.get_state("total").unwrap(), Some(b"1000".to_vec()));
//!     tx.into_write_set()
//! };
//!
//! assert_eq!(store.get_state("alice").unwrap(), None);
//! TxStore::apply(&mut store, writes).unwrap();
//! assert_eq!(store.get_state("alice").unwrap(), Some(b"1000".to_vec()));
//! ```

pub mod errors;
pub mod memory;
pub mod tx;

pub use errors::{StateError, StateResult};
pub use memory::MemoryStore;
pub use tx::{ReadSet, TxStore, WriteSet};

/// Key-value store supplied by the host platform.
///
/// `get_state` returns `Ok(None)` for an absent key; errors are reserved for
/// store faults.
pub trait StateStore {
    /// Read the raw value stored under `key`
    fn get_state(&self, key: &str) -> StateResult<Option<Vec<u8>>>;

    /// Write `value` under `key`
    fn put_state(&mut self, key: &str, value: Vec<u8>) -> StateResult<()>;
}

/// Reject keys the host cannot store
pub(crate) fn validate_key(key: &str) -> StateResult<()> {
    if key.is_empty() {
        return Err(StateError::InvalidKey(key.to_string()));
    }
    Ok(())
}
