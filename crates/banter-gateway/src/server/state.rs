//! Shared gateway state

use std::sync::Arc;

use banter_common::{AppConfig, JwtService};
use banter_core::{AuthService, HistoryStore};
use banter_engine::{Router, SessionRegistry};

use crate::connection::ConnectionManager;

/// State shared by the WebSocket handler and the HTTP API
#[derive(Clone)]
pub struct GatewayState {
    router: Arc<Router>,
    registry: Arc<SessionRegistry>,
    connection_manager: Arc<ConnectionManager>,
    history: Arc<dyn HistoryStore>,
    auth: Arc<dyn AuthService>,
    jwt: Arc<JwtService>,
    config: Arc<AppConfig>,
}

impl GatewayState {
    /// Create new gateway state
    pub fn new(
        router: Arc<Router>,
        registry: Arc<SessionRegistry>,
        connection_manager: Arc<ConnectionManager>,
        history: Arc<dyn HistoryStore>,
        auth: Arc<dyn AuthService>,
        jwt: Arc<JwtService>,
        config: AppConfig,
    ) -> Self {
        Self {
            router,
            registry,
            connection_manager,
            history,
            auth,
            jwt,
            config: Arc::new(config),
        }
    }

    /// Get the event router
    #[must_use]
    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    /// Get the session registry
    #[must_use]
    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Get the connection manager
    #[must_use]
    pub fn connection_manager(&self) -> &Arc<ConnectionManager> {
        &self.connection_manager
    }

    /// Get the history store
    #[must_use]
    pub fn history(&self) -> &Arc<dyn HistoryStore> {
        &self.history
    }

    /// Get the auth service
    #[must_use]
    pub fn auth(&self) -> &Arc<dyn AuthService> {
        &self.auth
    }

    /// Get the JWT service
    #[must_use]
    pub fn jwt(&self) -> &Arc<JwtService> {
        &self.jwt
    }

    /// Get the application configuration
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("connection_manager", &self.connection_manager)
            .finish_non_exhaustive()
    }
}
