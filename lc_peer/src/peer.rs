//! Simulate, validate and commit.
//!
//! [`Peer::execute`] runs one invocation end to end:
//!
//! 1. Simulate it against the committed state under a read lock, buffering
//!    writes in a `TxStore` overlay and recording the versions it read
//! 2. Under the write lock, check those versions are still current and
//!    commit the write set as one block
//! 3. On a read conflict, start over from fresh state, up to `max_attempts`
//!    simulations in total
//!
//! Read-only invocations and chaincode errors never reach the commit step.

use crate::logging::{log_conflict, log_invocation};
use crate::metrics;
use crate::world_state::{ReadVersions, WorldState, WorldStateError};
use lottery_chaincode::dispatch::Operation;
use lottery_chaincode::state::WriteSet;
use lottery_chaincode::{Chaincode, Response, Status};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::Instant;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A request to run the chaincode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Invocation {
    Init { args: Vec<String> },
    Invoke { function: String, args: Vec<String> },
}

impl Invocation {
    pub fn init(args: Vec<String>) -> Self {
        Invocation::Init { args }
    }

    pub fn invoke(function: impl Into<String>, args: Vec<String>) -> Self {
        Invocation::Invoke {
            function: function.into(),
            args,
        }
    }

    /// Function name used for logs
    pub fn function(&self) -> &str {
        match self {
            Invocation::Init { .. } => "init",
            Invocation::Invoke { function, .. } => function,
        }
    }

    pub fn args(&self) -> &[String] {
        match self {
            Invocation::Init { args } | Invocation::Invoke { args, .. } => args,
        }
    }

    /// Function label for metrics, `unknown` for unrecognised names
    pub fn metric_label(&self) -> &'static str {
        match self {
            Invocation::Init { .. } => "init",
            Invocation::Invoke { function, .. } => {
                Operation::lookup_name(function).unwrap_or("unknown")
            }
        }
    }
}

/// Outcome of one executed invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResult {
    /// SHA-256 hex transaction id
    pub tx_id: String,
    pub status: Status,
    /// Error message; empty on success
    pub message: String,
    pub payload: Option<String>,
    /// Simulations run, retries included
    pub attempts: u32,
}

impl InvocationResult {
    fn new(tx_id: &str, response: Response, attempts: u32) -> Self {
        Self {
            tx_id: tx_id.to_string(),
            status: response.status,
            message: response.message,
            payload: response.payload,
            attempts,
        }
    }
}

/// Peer execution errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PeerError {
    #[error("transaction {tx_id} rejected by chaincode: {message}")]
    Chaincode {
        tx_id: String,
        message: String,
        attempts: u32,
    },

    #[error("transaction {tx_id} conflicted on key {key} after {attempts} attempts")]
    Conflict {
        tx_id: String,
        key: String,
        attempts: u32,
    },
}

impl PeerError {
    /// Result body reported to the client
    pub fn to_result(&self) -> InvocationResult {
        match self {
            PeerError::Chaincode {
                tx_id,
                message,
                attempts,
            } => InvocationResult::new(tx_id, Response::error(message.clone()), *attempts),
            PeerError::Conflict { tx_id, attempts, .. } => InvocationResult::new(
                tx_id,
                Response::error("transaction aborted: too many read conflicts"),
                *attempts,
            ),
        }
    }
}

/// Result of one simulation, detached from the state it ran against
struct Simulation {
    response: Response,
    reads: ReadVersions,
    writes: WriteSet,
}

/// Single-node peer hosting the chaincode
pub struct Peer {
    chaincode: Chaincode,
    state: RwLock<WorldState>,
    max_attempts: u32,
}

impl Peer {
    /// Create a peer with empty world state
    pub fn new(chaincode: Chaincode, max_attempts: u32) -> Self {
        Self {
            chaincode,
            state: RwLock::new(WorldState::new()),
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn chaincode(&self) -> &Chaincode {
        &self.chaincode
    }

    /// Committed block height
    pub async fn height(&self) -> u64 {
        self.state.read().await.height()
    }

    /// Number of committed keys
    pub async fn key_count(&self) -> usize {
        self.state.read().await.len()
    }

    /// Run `invocation` to completion
    ///
    /// # Errors
    ///
    /// * `PeerError::Chaincode` - The chaincode returned an error; nothing
    ///   was committed
    /// * `PeerError::Conflict` - Every attempt hit a read conflict
    pub async fn execute(&self, invocation: Invocation) -> Result<InvocationResult, PeerError> {
        let tx_id = transaction_id(&invocation);
        let start = Instant::now();

        let outcome = self.run(&tx_id, &invocation).await;

        let status = match &outcome {
            Ok(_) => "OK",
            Err(PeerError::Chaincode { .. }) => "ERROR",
            Err(PeerError::Conflict { .. }) => "CONFLICT",
        };
        let attempts = match &outcome {
            Ok(result) => result.attempts,
            Err(PeerError::Chaincode { attempts, .. } | PeerError::Conflict { attempts, .. }) => {
                *attempts
            }
        };
        let elapsed = start.elapsed();

        let label = invocation.metric_label();
        metrics::invocations_total(label, status);
        metrics::invocation_duration_ms(label, elapsed.as_secs_f64() * 1000.0);
        log_invocation(
            &tx_id,
            invocation.function(),
            status,
            attempts,
            elapsed.as_millis() as u64,
        );

        outcome
    }

    async fn run(&self, tx_id: &str, invocation: &Invocation) -> Result<InvocationResult, PeerError> {
        let mut attempts = 0;

        loop {
            attempts += 1;

            let simulation = {
                let state = self.state.read().await;
                self.simulate(&state, invocation)
            };

            if !simulation.response.is_ok() {
                return Err(PeerError::Chaincode {
                    tx_id: tx_id.to_string(),
                    message: simulation.response.message,
                    attempts,
                });
            }

            if simulation.writes.is_empty() {
                return Ok(InvocationResult::new(tx_id, simulation.response, attempts));
            }

            let mut state = self.state.write().await;
            match state.commit(&simulation.reads, simulation.writes) {
                Ok(height) => {
                    tracing::debug!(tx_id = tx_id, height = height, "Committed block");
                    metrics::world_state_height(height);
                    metrics::world_state_keys(state.len());
                    return Ok(InvocationResult::new(tx_id, simulation.response, attempts));
                }
                Err(WorldStateError::ReadConflict { key }) => {
                    log_conflict(tx_id, &key, attempts);
                    metrics::read_conflicts_total(invocation.metric_label());
                    if attempts >= self.max_attempts {
                        return Err(PeerError::Conflict {
                            tx_id: tx_id.to_string(),
                            key,
                            attempts,
                        });
                    }
                }
            }
        }
    }

    fn simulate(&self, state: &WorldState, invocation: &Invocation) -> Simulation {
        let (response, tx) = self.chaincode.simulate(state, |tx| match invocation {
            Invocation::Init { args } => self.chaincode.init(tx, args),
            Invocation::Invoke { function, args } => self.chaincode.invoke(tx, function, args),
        });
        let (read_set, writes) = tx.into_sets();

        Simulation {
            response,
            reads: state.read_versions(&read_set),
            writes,
        }
    }
}

/// SHA-256 over the invocation and a random nonce, hex encoded
fn transaction_id(invocation: &Invocation) -> String {
    let mut hasher = Sha256::new();
    hasher.update(invocation.function().as_bytes());
    for arg in invocation.args() {
        hasher.update([0u8]);
        hasher.update(arg.as_bytes());
    }
    hasher.update(Uuid::new_v4().as_bytes());
    hex::encode(hasher.finalize())
}
