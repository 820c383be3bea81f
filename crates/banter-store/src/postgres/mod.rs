//! PostgreSQL implementations of the storage contracts

mod accounts;
mod error;
mod history;
mod models;

pub use accounts::PgAccounts;
pub use history::PgHistory;
