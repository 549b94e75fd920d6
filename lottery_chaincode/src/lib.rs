//! # Lottery Chaincode
//!
//! A shared credit pool and per-account balances, played through a
//! deterministic lottery, running on top of a host ledger's key-value state.
//!
//! The host owns transport, ordering and commit. This crate owns the
//! decisions: how wagers resolve, how the pool and balances move, and which
//! invariants hold (no balance is ever written negative).
//!
//! ## Architecture
//!
//! Every operation receives the state store as an explicit
//! `&mut dyn StateStore` handle:
//!
//! - **Initializer**: seeds the pool, rejecting values below the minimum
//! - **Dispatcher**: parses `invoke` into a closed [`Operation`] enum
//! - **AccountRegistry**: opens accounts with a fixed balance
//! - **BalanceLedger**: reads and adjusts balances with a non-negativity guard
//! - **WagerResolver**: settles a wager against the pool
//! - **QueryService**: pool health and balance lookups
//!
//! ## Core Modules
//!
//! - [`state`]: State store trait, in-memory store, transaction overlay
//! - [`ledger`]: Balances and account registration
//! - [`lottery`]: Wager resolution
//! - [`chaincode`]: `init` / `invoke` entry points and responses
//!
//! ## Example
//!
//! ```
//! use lottery_chaincode::{Chaincode, state::MemoryStore};
//!
//! let chaincode = Chaincode::default();
//! let mut store = MemoryStore::new();
//! let args = |values: &[&str]| values.iter().map(|v| v.to_string()).collect::<Vec<_>>();
//!
//! assert!(chaincode.init_atomic(&mut store, &args(&["1000"])).is_ok());
//! let opened = chaincode.invoke_atomic(&mut store, "create_user", &args(&["alice"]));
//! assert_eq!(opened.payload.as_deref(), Some("1000"));
//!
//! let played = chaincode.invoke_atomic(&mut store, "lottery", &args(&["alice", "700"]));
//! assert_eq!(played.payload.as_deref(), Some("congratulation!!!!"));
//! ```

/// Injected key-value state.
pub mod state;

/// Balances and account registration.
pub mod ledger;

/// Wager resolution against the pool.
pub mod lottery;

pub mod chaincode;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod init;
pub mod query;

pub use chaincode::{Chaincode, Response, Status};
pub use config::{ChaincodeConfig, ConfigError};
pub use dispatch::{Handler, Operation};
pub use errors::{ChaincodeError, ChaincodeResult, ValidationError};
pub use init::Initializer;
pub use ledger::{AccountRegistry, Balance, BalanceLedger};
pub use lottery::{Outcome, WagerResolver};
pub use query::QueryService;
