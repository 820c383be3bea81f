//! Request fixtures for API tests

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration request body
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

impl RegisterRequest {
    /// Create a request with a unique username
    pub fn unique() -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self {
            username: format!("user_{}", &suffix[..8]),
            password: "correct-horse-9".to_string(),
        }
    }

    /// Same username, different password
    pub fn with_password(&self, password: &str) -> Self {
        Self {
            username: self.username.clone(),
            password: password.to_string(),
        }
    }
}

/// Login request body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl From<&RegisterRequest> for LoginRequest {
    fn from(request: &RegisterRequest) -> Self {
        Self {
            username: request.username.clone(),
            password: request.password.clone(),
        }
    }
}

/// Registration response body
#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    pub username: String,
}

/// Login response body
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub username: String,
    pub token: String,
    pub expires_in: i64,
}
