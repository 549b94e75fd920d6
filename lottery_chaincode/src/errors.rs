//! Chaincode error types.

use crate::ledger::Balance;
use crate::state::StateError;
use thiserror::Error;

/// Argument validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `init` takes exactly one argument
    #[error("Incorrect number of arguments. Expecting 1")]
    InitArguments { got: usize },

    /// `init` argument is not an integer
    #[error("Expecting integer value for sum")]
    InitNotInteger(String),

    /// `init` value below the pool minimum
    #[error("init value must bigger than {minimum}")]
    InitBelowMinimum { value: Balance, minimum: Balance },

    /// Wrong argument count for an invoke operation
    #[error("{operation} expects {expected} argument(s), got {got}")]
    Arguments {
        operation: &'static str,
        expected: usize,
        got: usize,
    },

    /// Wager is not an integer
    #[error("Wager is not an integer: {0:?}")]
    WagerNotInteger(String),
}

impl ValidationError {
    /// Message returned to the invoking client
    pub fn client_message(&self) -> String {
        match self {
            ValidationError::Arguments { .. } => "params error".to_string(),
            ValidationError::WagerNotInteger(_) => "wager error!".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Chaincode errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChaincodeError {
    /// Malformed arguments
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No value stored under the key
    #[error("No balance stored for {key}")]
    NotFound { key: String },

    /// Stored value is not a base-10 integer
    #[error("Stored value for {key} is not an integer: {value:?}")]
    Parse { key: String, value: String },

    /// Adjustment would drive the balance negative
    #[error("Insufficient balance for {key}: balance {balance}, adjustment {delta}")]
    InsufficientFunds {
        key: String,
        balance: Balance,
        delta: Balance,
    },

    /// Account already registered
    #[error("Account {id} already exists")]
    AlreadyExists { id: String },

    /// Invoke function name not recognised
    #[error("Unknown operation: {function}")]
    UnknownOperation { function: String },

    /// Pool record missing or unreadable
    #[error("Pool is unavailable: {0}")]
    PoolUnavailable(Box<ChaincodeError>),

    /// Wager could not be taken from an absent or unreadable account
    #[error("Wager debit failed: {0}")]
    DebitFailed(Box<ChaincodeError>),

    /// Arithmetic leaves the balance range
    #[error("Balance overflow for {key}")]
    Overflow { key: String },

    /// State store fault
    #[error("State error: {0}")]
    State(#[from] StateError),
}

impl ChaincodeError {
    /// Get the message returned to the invoking client.
    ///
    /// These are the strings the chaincode has always answered with; store
    /// faults are sanitized so backend details never leave the peer.
    pub fn client_message(&self) -> String {
        match self {
            ChaincodeError::Validation(err) => err.client_message(),
            ChaincodeError::NotFound { .. } | ChaincodeError::Parse { .. } => {
                "get balance error!".to_string()
            }
            ChaincodeError::InsufficientFunds { .. } | ChaincodeError::DebitFailed(_) => {
                "balance not enough".to_string()
            }
            ChaincodeError::AlreadyExists { .. } => "uid has been registed".to_string(),
            ChaincodeError::UnknownOperation { .. } => {
                "Invalid invoke function name. Expecting query uid,lottery uid token,create_user uid"
                    .to_string()
            }
            ChaincodeError::PoolUnavailable(_) => "get total error!".to_string(),
            ChaincodeError::Overflow { .. } => "balance overflow".to_string(),
            ChaincodeError::State(_) => "Internal error".to_string(),
        }
    }

    /// Whether the error means the key holds no usable balance
    pub fn is_unreadable(&self) -> bool {
        matches!(
            self,
            ChaincodeError::NotFound { .. } | ChaincodeError::Parse { .. }
        )
    }
}

/// Result type for chaincode operations
pub type ChaincodeResult<T> = Result<T, ChaincodeError>;
