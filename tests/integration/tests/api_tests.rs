//! HTTP API integration tests
//!
//! Each test spawns a gateway on an ephemeral port with in-memory stores;
//! no external services are required.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
    TestServer,
};
use reqwest::StatusCode;

use banter_core::{HistoryStore, NewGroupMessage, NewPrivateMessage};

// ============================================================================
// Health Check
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Accounts
// ============================================================================

#[tokio::test]
async fn test_register_account() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/auth/register", &request).await.unwrap();
    let created: RegisterResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(created.username, request.username);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    server.post("/auth/register", &request).await.unwrap();

    let response = server.post("/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_weak_password() {
    let server = TestServer::start().await.expect("Failed to start server");

    // Long enough to pass shape validation but all digits
    let request = RegisterRequest::unique().with_password("1234567890");
    let response = server.post("/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // Too short to pass shape validation at all
    let request = RegisterRequest::unique().with_password("ab1");
    let response = server.post("/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_login() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    server.post("/auth/register", &request).await.unwrap();

    let response = server
        .post("/auth/login", &LoginRequest::from(&request))
        .await
        .unwrap();
    let login: LoginResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(login.username, request.username);
    assert!(!login.token.is_empty());
    assert_eq!(login.expires_in, 900);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    server.post("/auth/register", &request).await.unwrap();

    let wrong = LoginRequest {
        username: request.username.clone(),
        password: "not-the-password-1".to_string(),
    };
    let response = server.post("/auth/login", &wrong).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_login_unknown_username() {
    let server = TestServer::start().await.expect("Failed to start server");

    let request = LoginRequest {
        username: "ghost_user".to_string(),
        password: "whatever-99".to_string(),
    };
    let response = server.post("/auth/login", &request).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// History
// ============================================================================

#[tokio::test]
async fn test_room_history_empty() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/history/rooms/sports").await.unwrap();
    let messages: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(messages.is_empty());
}

#[tokio::test]
async fn test_room_history_returns_persisted_messages() {
    let server = TestServer::start().await.expect("Failed to start server");

    let history = server.state.history();
    history
        .append_group(NewGroupMessage::new("alice", "sports".into(), "first"))
        .await
        .unwrap();
    history
        .append_group(NewGroupMessage::new("bob", "sports".into(), "second"))
        .await
        .unwrap();
    history
        .append_group(NewGroupMessage::new("carol", "music".into(), "elsewhere"))
        .await
        .unwrap();

    let response = server.get("/history/rooms/sports").await.unwrap();
    let messages: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["from_user"], "alice");
    assert_eq!(messages[0]["message"], "first");
    assert_eq!(messages[1]["from_user"], "bob");
}

#[tokio::test]
async fn test_room_history_respects_limit() {
    let server = TestServer::start().await.expect("Failed to start server");

    let history = server.state.history();
    for i in 0..5 {
        history
            .append_group(NewGroupMessage::new("alice", "sports".into(), format!("m{i}")))
            .await
            .unwrap();
    }

    let response = server.get("/history/rooms/sports?limit=2").await.unwrap();
    let messages: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["message"], "m3");
    assert_eq!(messages[1]["message"], "m4");
}

#[tokio::test]
async fn test_direct_history_is_symmetric() {
    let server = TestServer::start().await.expect("Failed to start server");

    let history = server.state.history();
    history
        .append_private(NewPrivateMessage::new("alice", "bob", "hey"))
        .await
        .unwrap();
    history
        .append_private(NewPrivateMessage::new("bob", "alice", "yo"))
        .await
        .unwrap();

    let forward = server.get("/history/direct/alice/bob").await.unwrap();
    let forward: Vec<serde_json::Value> = assert_json(forward, StatusCode::OK).await.unwrap();
    assert_eq!(forward.len(), 2);

    let reverse = server.get("/history/direct/bob/alice").await.unwrap();
    let reverse: Vec<serde_json::Value> = assert_json(reverse, StatusCode::OK).await.unwrap();
    assert_eq!(forward, reverse);
}
