//! `init` / `invoke` entry points.
//!
//! Handlers work with typed [`ChaincodeResult`]s; this layer turns them into
//! the [`Response`] the host platform relays to the client, and offers
//! atomic variants that only apply writes when the invocation succeeds.

use crate::config::ChaincodeConfig;
use crate::dispatch::{Handler, Operation};
use crate::errors::ChaincodeResult;
use crate::init::Initializer;
use crate::state::{StateStore, TxStore, WriteSet};
use log::{debug, error};
use serde::{Deserialize, Serialize};

/// Response status, with the host platform's numeric codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Error,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Error => 500,
        }
    }
}

/// Invocation response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: Status,
    /// Error message; empty on success
    pub message: String,
    pub payload: Option<String>,
}

impl Response {
    pub fn success(payload: Option<String>) -> Self {
        Self {
            status: Status::Ok,
            message: String::new(),
            payload,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            payload: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    fn from_result(result: ChaincodeResult<Option<String>>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(err) => {
                debug!("invocation failed: {err}");
                Self::error(err.client_message())
            }
        }
    }
}

/// The lottery chaincode
#[derive(Debug, Clone, Default)]
pub struct Chaincode {
    config: ChaincodeConfig,
}

impl Chaincode {
    pub fn new(config: ChaincodeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChaincodeConfig {
        &self.config
    }

    /// Seed the pool; succeeds with an empty payload
    pub fn init(&self, store: &mut dyn StateStore, args: &[String]) -> Response {
        Response::from_result(
            Initializer::new(&self.config)
                .init(store, args)
                .map(|_| None),
        )
    }

    /// Route `function` with `args` to its handler
    pub fn invoke(&self, store: &mut dyn StateStore, function: &str, args: &[String]) -> Response {
        Response::from_result(self.dispatch(store, function, args).map(Some))
    }

    /// [`Chaincode::init`] with writes applied only on success
    pub fn init_atomic(&self, store: &mut dyn StateStore, args: &[String]) -> Response {
        self.atomically(store, |tx| self.init(tx, args))
    }

    /// [`Chaincode::invoke`] with writes applied only on success
    pub fn invoke_atomic(
        &self,
        store: &mut dyn StateStore,
        function: &str,
        args: &[String],
    ) -> Response {
        self.atomically(store, |tx| self.invoke(tx, function, args))
    }

    /// Run `f` against a fresh overlay and return its response with the
    /// write set it produced. The write set is empty unless the response
    /// is a success.
    pub fn simulate<'s, F>(&self, base: &'s dyn StateStore, f: F) -> (Response, TxStore<'s>)
    where
        F: FnOnce(&mut dyn StateStore) -> Response,
    {
        let mut tx = TxStore::new(base);
        let response = f(&mut tx);
        if !response.is_ok() {
            tx = TxStore::new(base);
        }
        (response, tx)
    }

    fn dispatch(
        &self,
        store: &mut dyn StateStore,
        function: &str,
        args: &[String],
    ) -> ChaincodeResult<String> {
        let operation = Operation::parse(function, args)?;
        debug!("dispatching {}", operation.name());
        operation.handle(store, &self.config)
    }

    fn atomically<F>(&self, store: &mut dyn StateStore, f: F) -> Response
    where
        F: FnOnce(&mut dyn StateStore) -> Response,
    {
        let (response, writes): (Response, WriteSet) = {
            let mut tx = TxStore::new(&*store);
            let response = f(&mut tx);
            (response, tx.into_write_set())
        };

        if !response.is_ok() {
            return response;
        }

        match TxStore::apply(store, writes) {
            Ok(()) => response,
            Err(err) => {
                error!("failed to apply write set: {err}");
                Response::error("Internal error")
            }
        }
    }
}
