//! Deterministic lottery against the shared pool.
//!
//! A wager is debited from the player, then compared with the pool:
//!
//! - **Hit** (`wager == pool`): the player is credited `wager + pool`
//! - **Near miss** (`pool - wager` strictly inside
//!   `(pool/4, pool/4 + pool/8)`): the player gets half the wager back
//! - **Miss**: the wager is credited to the pool
//!
//! There is no randomness; the outcome is a pure function of the pool and
//! the wager, see [`resolve`].

pub mod models;
pub mod resolver;

pub use models::{CreditTarget, LotteryReceipt, Outcome, Resolution};
pub use resolver::{WagerResolver, resolve};
