//! Account endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use banter_core::{AccountCreation, CredentialCheck};

use crate::server::GatewayState;

use super::{ApiError, ApiResult};

/// Registration request body
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 32))]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Registration response body
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub username: String,
}

/// Login request body
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 2, max = 32))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Login response body
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: String,
    pub token: String,
    pub expires_in: i64,
}

/// POST /auth/register
pub async fn register(
    State(state): State<GatewayState>,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    body.validate()?;

    match state
        .auth()
        .create_account(&body.username, &body.password)
        .await?
    {
        AccountCreation::Created(user) => {
            tracing::info!(username = %user.username, "Account registered");
            Ok((
                StatusCode::CREATED,
                Json(RegisterResponse {
                    username: user.username,
                }),
            ))
        }
        AccountCreation::UsernameTaken => Err(ApiError::UsernameTaken),
        AccountCreation::ValidationFailed(reason) => {
            Err(ApiError::App(banter_common::AppError::Validation(reason)))
        }
    }
}

/// POST /auth/login
pub async fn login(
    State(state): State<GatewayState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    body.validate()?;

    match state
        .auth()
        .verify_credentials(&body.username, &body.password)
        .await?
    {
        CredentialCheck::Verified(user) => {
            let token = state.jwt().issue_token(&user.username)?;

            tracing::debug!(username = %user.username, "Login succeeded");

            Ok(Json(LoginResponse {
                username: user.username,
                token,
                expires_in: state.jwt().access_token_expiry(),
            }))
        }
        CredentialCheck::Rejected => Err(ApiError::InvalidCredentials),
    }
}
