//! HTTP client for the chaincode peer.

use anyhow::{Context, Result};
use lottery_chaincode::Status;
use serde::{Deserialize, Serialize};

use crate::commands::Command;

/// Client for a peer's HTTP API
pub struct PeerClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct InitRequest<'a> {
    args: [&'a str; 1],
}

#[derive(Debug, Serialize)]
struct InvokeRequest<'a> {
    function: &'a str,
    args: &'a [String],
}

/// Invocation outcome as reported by the peer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InvocationResult {
    pub tx_id: String,
    pub status: Status,
    pub message: String,
    pub payload: Option<String>,
    pub attempts: u32,
}

impl PeerClient {
    /// Create a client for the peer at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Seed the pool
    pub async fn init(&self, sum: &str) -> Result<InvocationResult> {
        self.post("init", &InitRequest { args: [sum] }).await
    }

    /// Invoke a chaincode function
    pub async fn invoke(&self, function: &str, args: &[String]) -> Result<InvocationResult> {
        self.post("invoke", &InvokeRequest { function, args }).await
    }

    /// Run a parsed command
    pub async fn execute(&self, command: &Command) -> Result<InvocationResult> {
        match command {
            Command::Init { sum } => self.init(sum).await,
            Command::Invoke { function, args } => self.invoke(function, args).await,
        }
    }

    /// Fetch the peer's health report
    pub async fn health(&self) -> Result<serde_json::Value> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .context("Failed to send health request")?;

        if !response.status().is_success() {
            anyhow::bail!("Health check failed: {}", response.status());
        }

        response
            .json()
            .await
            .context("Failed to parse health response")
    }

    /// Chaincode errors and read conflicts still carry an invocation result;
    /// any other failure status is an error.
    async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<InvocationResult> {
        let response = self
            .client
            .post(format!("{}/api/v1/{}", self.base_url, endpoint))
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send {} request", endpoint))?;

        let status = response.status();
        if !status.is_success() && status != 400 && status != 409 {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response: {}", e));
            anyhow::bail!("Peer returned {}: {}", status, error_text);
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse {} response", endpoint))
    }
}
