//! Authentication DTOs

use serde::{Deserialize, Serialize};

/// Request body for the token endpoint
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// Response body carrying a freshly issued staff token
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
}
