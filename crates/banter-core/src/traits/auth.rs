//! Authentication service port
//!
//! Credential storage and verification happen out-of-band, before a client
//! opens its event connection. The coordinator only depends on this
//! contract.

use async_trait::async_trait;

use crate::error::DomainError;

/// A successfully verified identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedUser {
    pub username: String,
}

/// Outcome of a credential check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialCheck {
    Verified(VerifiedUser),
    Rejected,
}

/// Outcome of an account creation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountCreation {
    Created(VerifiedUser),
    UsernameTaken,
    ValidationFailed(String),
}

/// Opaque authentication service
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Verify a username/secret pair
    async fn verify_credentials(
        &self,
        username: &str,
        secret: &str,
    ) -> Result<CredentialCheck, DomainError>;

    /// Create a new account
    async fn create_account(
        &self,
        username: &str,
        secret: &str,
    ) -> Result<AccountCreation, DomainError>;
}
