//! Single-node peer hosting the lottery chaincode.
//!
//! Stands in for the ledger platform: keeps a versioned world state,
//! simulates invocations against it, validates read sets and commits write
//! sets, and serves the whole pipeline over HTTP.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod peer;
pub mod world_state;

pub use config::{ConfigError, PeerConfig};
pub use peer::{Invocation, InvocationResult, Peer, PeerError};
pub use world_state::WorldState;
