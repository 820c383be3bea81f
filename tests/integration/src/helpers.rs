//! Test helpers for integration tests
//!
//! Provides a spawned HTTP test server backed by in-memory stores, plus an
//! engine harness that wires the router to a real connection manager with
//! channel-backed client endpoints.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use banter_common::{AppConfig, Environment};
use banter_common::config::{AppSettings, JwtConfig, ServerConfig};
use banter_core::{ConnectionId, DeliveryChannel, HistoryStore, OutboundEvent, RoomCatalog};
use banter_engine::{ClientEvent, RouteOutcome, Router, SessionRegistry};
use banter_gateway::{create_app, server::create_gateway_state, ConnectionManager, GatewayState};
use banter_store::MemoryHistory;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: GatewayState,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a test server on an ephemeral port with in-memory stores
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_gateway_state(config).await?;
        let app = create_app(state.clone());

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            state,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }
}

/// Create a test configuration backed by in-memory stores
pub fn test_config() -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "banter-test".to_string(),
            env: Environment::Development,
        },
        gateway: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: None,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry: 900,
        },
        rooms: Vec::new(),
    }
}

/// Assert response status and parse the JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status, discarding the body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Engine wired to a real connection manager, with channel-backed clients
pub struct EngineHarness {
    pub router: Router,
    pub registry: Arc<SessionRegistry>,
    pub manager: Arc<ConnectionManager>,
    pub history: Arc<MemoryHistory>,
}

impl EngineHarness {
    /// Build a harness with an unrestricted room catalog
    pub fn new() -> Self {
        Self::with_catalog(RoomCatalog::open())
    }

    /// Build a harness with the given catalog
    pub fn with_catalog(catalog: RoomCatalog) -> Self {
        let registry = SessionRegistry::new_shared();
        let manager = ConnectionManager::new_shared();
        let history = Arc::new(MemoryHistory::new());

        let router = Router::new(
            registry.clone(),
            history.clone() as Arc<dyn HistoryStore>,
            manager.clone() as Arc<dyn DeliveryChannel>,
            catalog,
        );

        Self {
            router,
            registry,
            manager,
            history,
        }
    }

    /// Attach a new client: a registered connection whose outbound events
    /// land in the returned receiver
    pub async fn connect(&self, display_name: &str) -> TestClient {
        let connection_id = ConnectionId::generate();
        let (tx, rx) = mpsc::channel(64);
        self.manager.add_connection(connection_id, tx);

        let outcome = self
            .router
            .handle(
                connection_id,
                ClientEvent::Register {
                    display_name: display_name.to_string(),
                },
            )
            .await
            .expect("register failed");
        assert_eq!(outcome, RouteOutcome::Applied);

        TestClient { connection_id, rx }
    }

    /// Route one event for a client
    pub async fn send(&self, client: &TestClient, event: ClientEvent) -> RouteOutcome {
        self.router
            .handle(client.connection_id, event)
            .await
            .expect("routing failed")
    }
}

impl Default for EngineHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A channel-backed client endpoint
pub struct TestClient {
    pub connection_id: ConnectionId,
    pub rx: mpsc::Receiver<OutboundEvent>,
}

impl TestClient {
    /// Receive the next outbound event, failing after a short timeout
    pub async fn recv(&mut self) -> OutboundEvent {
        tokio::time::timeout(Duration::from_secs(1), self.rx.recv())
            .await
            .expect("timed out waiting for event")
            .expect("connection channel closed")
    }

    /// Drain every event currently queued
    pub fn drain(&mut self) -> Vec<OutboundEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// Assert that no event is queued
    pub fn assert_silent(&mut self) {
        assert!(self.rx.try_recv().is_err(), "expected no queued events");
    }
}
