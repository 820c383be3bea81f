//! Gateway server setup
//!
//! Wires configuration into stores, engine, and routes, and runs the
//! axum server.

mod handler;
mod state;

pub use handler::ws_handler;
pub use state::GatewayState;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use banter_common::{AppConfig, AppError, JwtService};
use banter_core::{AuthService, HistoryStore};
use banter_engine::{Router as EventRouter, SessionRegistry};
use banter_store::{DatabaseConfig, MemoryAccounts, MemoryHistory, PgAccounts, PgHistory};

use crate::connection::ConnectionManager;
use crate::http;

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health_check))
        .route("/auth/register", post(http::auth::register))
        .route("/auth/login", post(http::auth::login))
        .route("/history/rooms/:room", get(http::history::room_history))
        .route(
            "/history/direct/:user_a/:user_b",
            get(http::history::direct_history),
        )
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize stores and engine from configuration and create `GatewayState`
pub async fn create_gateway_state(config: AppConfig) -> Result<GatewayState, AppError> {
    let (history, auth): (Arc<dyn HistoryStore>, Arc<dyn AuthService>) =
        match &config.database {
            Some(db) => {
                tracing::info!("Connecting to PostgreSQL...");
                let mut db_config = DatabaseConfig::new(db.url.clone());
                db_config.max_connections = db.max_connections;
                db_config.min_connections = db.min_connections;

                let pool = banter_store::create_pool(&db_config)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                tracing::info!("PostgreSQL connection established");

                (
                    Arc::new(PgHistory::new(pool.clone())),
                    Arc::new(PgAccounts::new(pool)),
                )
            }
            None => {
                tracing::info!("No DATABASE_URL configured; using in-memory stores");
                (Arc::new(MemoryHistory::new()), Arc::new(MemoryAccounts::new()))
            }
        };

    let jwt = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    let registry = SessionRegistry::new_shared();
    let connection_manager = ConnectionManager::new_shared();

    let router = Arc::new(EventRouter::new(
        registry.clone(),
        history.clone(),
        connection_manager.clone(),
        config.room_catalog(),
    ));

    Ok(GatewayState::new(
        router,
        registry,
        connection_manager,
        history,
        auth,
        jwt,
        config,
    ))
}

/// Run the gateway server on the given address
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    tracing::info!("Starting gateway server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Gateway listening on ws://{}/ws", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete gateway server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .gateway
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid bind address: {e}")))?;

    let state = create_gateway_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
