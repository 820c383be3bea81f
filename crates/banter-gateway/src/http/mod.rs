//! HTTP API surface
//!
//! Account endpoints and message-history queries. These live beside the
//! WebSocket endpoint but never touch live session state.

pub mod auth;
mod error;
pub mod history;

pub use error::{ApiError, ApiResult};
