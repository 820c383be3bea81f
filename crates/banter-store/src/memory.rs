//! In-process store implementations
//!
//! Default backend when no `DATABASE_URL` is configured. History lives in
//! lock-protected vectors in append order; accounts keep only a username to
//! Argon2 hash mapping.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;

use banter_core::{
    AccountCreation, AuthService, CredentialCheck, DomainError, GroupMessage, HistoryStore,
    NewGroupMessage, NewPrivateMessage, PrivateMessage, RoomId, StoreResult, VerifiedUser,
};
use banter_common::auth::{hash_password, validate_password_strength, verify_password};

/// In-memory history store
#[derive(Debug, Default)]
pub struct MemoryHistory {
    group: RwLock<Vec<GroupMessage>>,
    private: RwLock<Vec<PrivateMessage>>,
}

impl MemoryHistory {
    /// Create a new, empty history store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistory {
    async fn append_group(&self, draft: NewGroupMessage) -> StoreResult<GroupMessage> {
        let stored = draft.stored_at(Utc::now());
        self.group.write().push(stored.clone());
        Ok(stored)
    }

    async fn append_private(&self, draft: NewPrivateMessage) -> StoreResult<PrivateMessage> {
        let stored = draft.stored_at(Utc::now());
        self.private.write().push(stored.clone());
        Ok(stored)
    }

    async fn query_group(&self, room: &RoomId, limit: usize) -> StoreResult<Vec<GroupMessage>> {
        let group = self.group.read();
        let matching: Vec<&GroupMessage> = group.iter().filter(|m| &m.room == room).collect();

        // Most recent `limit` messages, in chronological order.
        let skip = matching.len().saturating_sub(limit);
        Ok(matching.into_iter().skip(skip).cloned().collect())
    }

    async fn query_private(
        &self,
        user_a: &str,
        user_b: &str,
        limit: usize,
    ) -> StoreResult<Vec<PrivateMessage>> {
        let private = self.private.read();
        let matching: Vec<&PrivateMessage> =
            private.iter().filter(|m| m.between(user_a, user_b)).collect();

        let skip = matching.len().saturating_sub(limit);
        Ok(matching.into_iter().skip(skip).cloned().collect())
    }
}

/// In-memory account store
#[derive(Debug, Default)]
pub struct MemoryAccounts {
    hashes: RwLock<HashMap<String, String>>,
}

impl MemoryAccounts {
    /// Create a new, empty account store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthService for MemoryAccounts {
    async fn verify_credentials(
        &self,
        username: &str,
        secret: &str,
    ) -> Result<CredentialCheck, DomainError> {
        let hash = match self.hashes.read().get(username).cloned() {
            Some(hash) => hash,
            None => return Ok(CredentialCheck::Rejected),
        };

        let verified = verify_password(secret, &hash)
            .map_err(|e| DomainError::InternalError(e.to_string()))?;

        if verified {
            Ok(CredentialCheck::Verified(VerifiedUser {
                username: username.to_string(),
            }))
        } else {
            Ok(CredentialCheck::Rejected)
        }
    }

    async fn create_account(
        &self,
        username: &str,
        secret: &str,
    ) -> Result<AccountCreation, DomainError> {
        if let Err(e) = validate_password_strength(secret) {
            return Ok(AccountCreation::ValidationFailed(e.to_string()));
        }

        let hash =
            hash_password(secret).map_err(|e| DomainError::InternalError(e.to_string()))?;

        let mut hashes = self.hashes.write();
        if hashes.contains_key(username) {
            return Ok(AccountCreation::UsernameTaken);
        }
        hashes.insert(username.to_string(), hash);

        tracing::info!(username = %username, "Account created");

        Ok(AccountCreation::Created(VerifiedUser {
            username: username.to_string(),
        }))
    }
}
