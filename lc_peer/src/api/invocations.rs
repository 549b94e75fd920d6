//! Chaincode invocation handlers.
//!
//! Both endpoints answer with an [`InvocationResult`]:
//!
//! - `200 OK` when the chaincode succeeded and its writes are committed
//! - `400 Bad Request` when the chaincode returned an error
//! - `409 Conflict` when every attempt hit a read conflict
//!
//! # Examples
//!
//! ```bash
//! curl -X POST http://localhost:7051/api/v1/init \
//!   -H "Content-Type: application/json" \
//!   -d '{"args": ["1000"]}'
//!
//! curl -X POST http://localhost:7051/api/v1/invoke \
//!   -H "Content-Type: application/json" \
//!   -d '{"function": "lottery", "args": ["alice", "700"]}'
//! ```

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use super::AppState;
use super::request_id::RequestId;
use crate::peer::{Invocation, InvocationResult, PeerError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitRequest {
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeRequest {
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
}

type InvocationResponse = Result<Json<InvocationResult>, (StatusCode, Json<InvocationResult>)>;

/// Seed the pool.
pub async fn init(
    State(state): State<AppState>,
    request_id: RequestId,
    Json(request): Json<InitRequest>,
) -> InvocationResponse {
    execute(&state, request_id, Invocation::init(request.args)).await
}

/// Invoke a chaincode function.
pub async fn invoke(
    State(state): State<AppState>,
    request_id: RequestId,
    Json(request): Json<InvokeRequest>,
) -> InvocationResponse {
    execute(
        &state,
        request_id,
        Invocation::invoke(request.function, request.args),
    )
    .await
}

async fn execute(
    state: &AppState,
    request_id: RequestId,
    invocation: Invocation,
) -> InvocationResponse {
    match state.peer.execute(invocation).await {
        Ok(result) => {
            tracing::debug!(request_id = %request_id.as_str(), tx_id = %result.tx_id, "Committed");
            Ok(Json(result))
        }
        Err(err) => {
            tracing::info!(request_id = %request_id.as_str(), "{err}");
            let status = match err {
                PeerError::Chaincode { .. } => StatusCode::BAD_REQUEST,
                PeerError::Conflict { .. } => StatusCode::CONFLICT,
            };
            Err((status, Json(err.to_result())))
        }
    }
}
