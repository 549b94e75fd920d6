//! Ledger module providing account balances on top of the state store.
//!
//! This module implements:
//! - Balance reads and signed adjustments with a non-negativity guard
//! - Account registration with a fixed opening balance
//!
//! Balances are stored as canonical base-10 strings, one key per account,
//! with the shared pool living under its own key.
//!
//! ## Example
//!
//! ```
//! use lottery_chaincode::ledger::{AccountRegistry, BalanceLedger};
//! use lottery_chaincode::state::MemoryStore;
//! use lottery_chaincode::ChaincodeConfig;
//!
//! let config = ChaincodeConfig::default();
//! let mut store = MemoryStore::new();
//!
//! let opening = AccountRegistry::new(&config)
//!     .create_user(&mut store, "alice")
//!     .unwrap();
//! assert_eq!(opening, 1000);
//!
//! let mut ledger = BalanceLedger::new(&mut store);
//! assert_eq!(ledger.adjust("alice", -250).unwrap(), 750);
//! assert!(ledger.adjust("alice", -751).is_err());
//! assert_eq!(ledger.get("alice").unwrap(), 750);
//! ```

pub mod balance;
pub mod registry;

pub use balance::{BalanceLedger, decode_balance, encode_balance};
pub use registry::AccountRegistry;

/// Account and pool balance
pub type Balance = i64;
