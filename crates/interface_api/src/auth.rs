//! Authentication and authorization

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (staff member ID)
    pub sub: String,
    /// Roles held by the staff member
    pub roles: Vec<String>,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Missing permission: {0}")]
    MissingPermission(String),
}

/// Creates a new JWT token for a staff member
pub fn create_token(
    user_id: &str,
    roles: Vec<String>,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = Claims {
        sub: user_id.to_string(),
        roles,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        if e.to_string().contains("ExpiredSignature") {
            AuthError::TokenExpired
        } else {
            AuthError::InvalidToken
        }
    })?;

    Ok(token_data.claims)
}

/// Checks if the staff member has the required role
pub fn has_role(claims: &Claims, required_role: &str) -> bool {
    claims
        .roles
        .iter()
        .any(|r| r == required_role || r == "admin")
}

/// Permission definitions
pub mod permissions {
    pub const PATIENT_READ: &str = "patient:read";
    pub const PATIENT_WRITE: &str = "patient:write";
    pub const CLAIM_READ: &str = "claim:read";
    pub const CLAIM_WRITE: &str = "claim:write";
    pub const CLAIM_SUBMIT: &str = "claim:submit";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let token = create_token(
            "staff-1",
            vec!["patient:read".to_string()],
            "test-secret",
            3600,
        )
        .unwrap();
        let claims = validate_token(&token, "test-secret").unwrap();
        assert_eq!(claims.sub, "staff-1");
        assert!(has_role(&claims, "patient:read"));
        assert!(!has_role(&claims, "claim:submit"));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token("staff-1", vec![], "secret-a", 3600).unwrap();
        assert!(validate_token(&token, "secret-b").is_err());
    }

    #[test]
    fn test_admin_passes_all_role_checks() {
        let token = create_token("staff-1", vec!["admin".to_string()], "s", 3600).unwrap();
        let claims = validate_token(&token, "s").unwrap();
        assert!(has_role(&claims, permissions::CLAIM_SUBMIT));
    }
}
