//! # banter-common
//!
//! Shared utilities: configuration, unified errors, auth helpers, and
//! telemetry setup.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

pub use auth::{hash_password, verify_password, Claims, JwtService};
pub use config::{AppConfig, ConfigError, Environment, ServerConfig};
pub use error::AppError;
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig};
