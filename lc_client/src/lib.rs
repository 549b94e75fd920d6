//! Internal modules for the lottery client.
//!
//! This library provides command parsing and the peer HTTP client used by
//! the lc_client binary.

pub mod api_client;
pub mod commands;
