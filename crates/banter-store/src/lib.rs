//! # banter-store
//!
//! Storage layer behind the `HistoryStore` and `AuthService` contracts from
//! `banter-core`.
//!
//! Two backends:
//!
//! - `memory`: lock-protected in-process stores, used when no database is
//!   configured and throughout the test suites
//! - `postgres`: SQLx-backed repositories with `FromRow` models and a
//!   managed connection pool

pub mod memory;
pub mod pool;
pub mod postgres;

pub use memory::{MemoryAccounts, MemoryHistory};
pub use pool::{create_pool, DatabaseConfig, PgPool};
pub use postgres::{PgAccounts, PgHistory};
