//! Integration test utilities for the chat coordinator
//!
//! Provides helpers for running end-to-end tests against the HTTP API and
//! for driving the engine over a real connection manager.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
