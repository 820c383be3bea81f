//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
///
/// Most invalid conditions in the routing engine are silent no-ops by
/// design and never become errors; these variants cover the conditions
/// that must surface (a failed history append above all, since broadcasting
/// an unpersisted message would break persist-before-broadcast).
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("History store failure: {0}")]
    Store(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::Store(_) => "STORE_FAILURE",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::UsernameTaken(_) => "USERNAME_TAKEN",
            Self::AccountNotFound(_) => "UNKNOWN_ACCOUNT",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AccountNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::UsernameTaken(_))
    }
}
