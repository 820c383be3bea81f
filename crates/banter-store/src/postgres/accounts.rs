//! PostgreSQL implementation of `AuthService`

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use banter_common::auth::{hash_password, validate_password_strength, verify_password};
use banter_core::{AccountCreation, AuthService, CredentialCheck, DomainError, VerifiedUser};

use super::error::{map_db_error, map_unique_violation};
use super::models::AccountModel;

/// PostgreSQL-backed account store
#[derive(Clone)]
pub struct PgAccounts {
    pool: PgPool,
}

impl PgAccounts {
    /// Create a new account store on the given pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthService for PgAccounts {
    #[instrument(skip(self, secret))]
    async fn verify_credentials(
        &self,
        username: &str,
        secret: &str,
    ) -> Result<CredentialCheck, DomainError> {
        let account = sqlx::query_as::<_, AccountModel>(
            r#"
            SELECT username, password_hash
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let Some(account) = account else {
            return Ok(CredentialCheck::Rejected);
        };

        let verified = verify_password(secret, &account.password_hash)
            .map_err(|e| DomainError::InternalError(e.to_string()))?;

        if verified {
            Ok(CredentialCheck::Verified(VerifiedUser {
                username: account.username,
            }))
        } else {
            Ok(CredentialCheck::Rejected)
        }
    }

    #[instrument(skip(self, secret))]
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

        let result = sqlx::query(
            r#"
            INSERT INTO accounts (username, password_hash)
            VALUES ($1, $2)
            "#,
        )
        .bind(username)
        .bind(&hash)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                tracing::info!(username = %username, "Account created");
                Ok(AccountCreation::Created(VerifiedUser {
                    username: username.to_string(),
                }))
            }
            Err(e) => {
                let mapped =
                    map_unique_violation(e, || DomainError::UsernameTaken(username.to_string()));
                if matches!(mapped, DomainError::UsernameTaken(_)) {
                    Ok(AccountCreation::UsernameTaken)
                } else {
                    Err(mapped)
                }
            }
        }
    }
}
