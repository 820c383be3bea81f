//! Error mapping for the PostgreSQL backend

use banter_core::DomainError;
use sqlx::Error as SqlxError;

/// Convert an SQLx error to a store failure
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::Store(e.to_string())
}

/// Check for a unique violation, mapping it separately from other failures
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::Store(e.to_string())
}
