//! Token issuance handler
//!
//! Staff exchange the configured credentials for a JWT carrying the full
//! permission set. When no credentials are configured the endpoint is
//! disabled and every request is rejected.

use axum::{extract::State, Json};
use tracing::warn;

use crate::auth::{self, permissions};
use crate::config::ApiConfig;
use crate::dto::auth::{TokenRequest, TokenResponse};
use crate::error::ApiError;
use crate::AppState;

/// Issues a staff JWT for valid credentials
pub async fn issue_token(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    mint_staff_token(&state.config, &request).map(Json)
}

/// Roles granted to a staff token
fn staff_roles() -> Vec<String> {
    vec![
        permissions::PATIENT_READ.to_string(),
        permissions::PATIENT_WRITE.to_string(),
        permissions::CLAIM_READ.to_string(),
        permissions::CLAIM_WRITE.to_string(),
        permissions::CLAIM_SUBMIT.to_string(),
    ]
}

fn mint_staff_token(config: &ApiConfig, request: &TokenRequest) -> Result<TokenResponse, ApiError> {
    if config.auth_username.is_empty() {
        warn!("token requested but no staff credentials are configured");
        return Err(ApiError::Unauthorized);
    }

    if request.username != config.auth_username || request.password != config.auth_password {
        warn!(username = %request.username, "token request with wrong credentials");
        return Err(ApiError::Unauthorized);
    }

    let token = auth::create_token(
        &request.username,
        staff_roles(),
        &config.jwt_secret,
        config.jwt_expiration_secs,
    )
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(TokenResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: config.jwt_expiration_secs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ApiConfig {
        ApiConfig {
            auth_username: "frontdesk".to_string(),
            auth_password: "s3cret".to_string(),
            ..ApiConfig::default()
        }
    }

    fn request(username: &str, password: &str) -> TokenRequest {
        TokenRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn valid_credentials_yield_a_usable_token() {
        let config = config();
        let response = mint_staff_token(&config, &request("frontdesk", "s3cret")).unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, config.jwt_expiration_secs);

        let claims = auth::validate_token(&response.token, &config.jwt_secret).unwrap();
        assert_eq!(claims.sub, "frontdesk");
        assert!(auth::has_role(&claims, permissions::CLAIM_SUBMIT));
    }

    #[test]
    fn wrong_password_is_rejected() {
        let result = mint_staff_token(&config(), &request("frontdesk", "wrong"));
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }

    #[test]
    fn endpoint_is_disabled_without_configured_credentials() {
        let result = mint_staff_token(&ApiConfig::default(), &request("frontdesk", "s3cret"));
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }
}
