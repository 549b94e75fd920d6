//! HTTP API for the peer.
//!
//! # Endpoints
//!
//! ```text
//! GET  /health          - Peer status, block height, key count
//! POST /api/v1/init     - Seed the pool: {"args": ["1000"]}
//! POST /api/v1/invoke   - Invoke: {"function": "lottery", "args": ["alice", "700"]}
//! ```
//!
//! Every response carries an `x-request-id` header.
//!
//! # Example
//!
//! ```rust,no_run
//! use lc_peer::api::{AppState, create_router};
//! use lc_peer::peer::Peer;
//! use lottery_chaincode::Chaincode;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = AppState {
//!     peer: Arc::new(Peer::new(Chaincode::default(), 3)),
//! };
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:7051").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod invocations;
pub mod request_id;

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::peer::Peer;

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub peer: Arc<Peer>,
}

/// Build the router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/init", post(invocations::init))
        .route("/invoke", post(invocations::invoke));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", v1_routes)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring.
///
/// ```bash
/// curl http://localhost:7051/health
/// # {"status":"healthy","version":"0.1.0","height":4,"keys":3,"timestamp":"..."}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let height = state.peer.height().await;
    let keys = state.peer.key_count().await;

    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "height": height,
        "keys": keys,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
