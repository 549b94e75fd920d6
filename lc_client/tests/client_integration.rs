//! Integration tests for lc_client against an in-process peer.

use lc_client::api_client::PeerClient;
use lc_client::commands::parse_command;
use lc_peer::api::{AppState, create_router};
use lc_peer::peer::Peer;
use lottery_chaincode::{Chaincode, Status};
use std::sync::Arc;

/// Serve a fresh peer on an ephemeral port and return its URL
async fn spawn_peer() -> String {
    let state = AppState {
        peer: Arc::new(Peer::new(Chaincode::default(), 3)),
    };
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });

    format!("http://{}", addr)
}

fn words(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

// ============================================================================
// Round Trip Tests
// ============================================================================

#[tokio::test]
async fn test_session_through_client() {
    let client = PeerClient::new(spawn_peer().await);

    let result = client.init("1000").await.unwrap();
    assert_eq!(result.status, Status::Ok);
    assert_eq!(result.payload, None);

    let result = client.invoke("create_user", &words(&["alice"])).await.unwrap();
    assert_eq!(result.payload.as_deref(), Some("1000"));

    let result = client.invoke("lottery", &words(&["alice", "600"])).await.unwrap();
    assert_eq!(result.payload.as_deref(), Some("Good Luck Next Time!"));

    let command = parse_command(&words(&["invoke", "query", "alice"])).unwrap();
    let result = client.execute(&command).await.unwrap();
    assert_eq!(result.payload.as_deref(), Some("400"));

    let health = client.health().await.unwrap();
    assert_eq!(health["height"], 3);
}

#[tokio::test]
async fn test_chaincode_error_is_a_result_not_a_failure() {
    let client = PeerClient::new(format!("{}/", spawn_peer().await));

    let result = client.init("50").await.unwrap();
    assert_eq!(result.status, Status::Error);
    assert_eq!(result.message, "init value must bigger than 100");

    let result = client.invoke("query", &[]).await.unwrap();
    assert_eq!(result.status, Status::Error);
    assert_eq!(result.message, "get total error!");
}

// ============================================================================
// Network Error Scenario Tests
// ============================================================================

#[tokio::test]
async fn test_connection_refused() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = PeerClient::new(format!("http://{}", addr));
    let result = client.invoke("query", &[]).await;

    assert!(result.is_err(), "Should fail when the peer is not available");
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Failed to send invoke request")
    );
}
