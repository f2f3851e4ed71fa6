//! API error handling
//!
//! Four classes of failure stay distinct end to end: bad input (400/422),
//! lookups (404), auth (401/403), and internal faults (500, message kept
//! generic). Best-effort side effects (mail, image decode, classification)
//! never become errors at this layer; they degrade inside their own crates.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use infra_db::DatabaseError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Internal(msg) => {
                // Log the detail, return a generic message
                error!(detail = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                )
            }
            ApiError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg.clone())
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match &err {
            DatabaseError::NotFound(msg) => ApiError::NotFound(msg.clone()),
            DatabaseError::DuplicateEntry(msg) => ApiError::Conflict(msg.clone()),
            DatabaseError::ForeignKeyViolation(msg) | DatabaseError::ConstraintViolation(msg) => {
                ApiError::Validation(msg.clone())
            }
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<domain_claims::ClaimError> for ApiError {
    fn from(err: domain_claims::ClaimError) -> Self {
        use domain_claims::ClaimError;
        match &err {
            ClaimError::ClaimNotFound(msg) => ApiError::NotFound(msg.clone()),
            ClaimError::InvalidStatusTransition { .. } => ApiError::Conflict(err.to_string()),
            ClaimError::ToothPatientMismatch { .. }
            | ClaimError::ToothRequired(_)
            | ClaimError::InvalidClaimReference(_) => ApiError::Validation(err.to_string()),
            ClaimError::Core(core) => core_error(core),
        }
    }
}

impl From<domain_patient::PatientError> for ApiError {
    fn from(err: domain_patient::PatientError) -> Self {
        use domain_patient::PatientError;
        match &err {
            PatientError::PatientNotFound(msg)
            | PatientError::ToothRecordNotFound(msg)
            | PatientError::XrayNotFound(msg) => ApiError::NotFound(msg.clone()),
            PatientError::Validation(msg) => ApiError::Validation(msg.clone()),
            PatientError::Core(core) => core_error(core),
        }
    }
}

impl From<core_kernel::CoreError> for ApiError {
    fn from(err: core_kernel::CoreError) -> Self {
        core_error(&err)
    }
}

fn core_error(err: &core_kernel::CoreError) -> ApiError {
    use core_kernel::CoreError;
    match err {
        CoreError::Validation(msg) => ApiError::Validation(msg.clone()),
        CoreError::NotFound(msg) => ApiError::NotFound(msg.clone()),
        other => ApiError::Internal(other.to_string()),
    }
}

impl From<infra_documents::DocumentError> for ApiError {
    fn from(err: infra_documents::DocumentError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<crate::intake::IntakeError> for ApiError {
    fn from(err: crate::intake::IntakeError) -> Self {
        use crate::intake::IntakeError;
        match &err {
            IntakeError::UnrecognizedFormat | IntakeError::Malformed { .. } => {
                ApiError::BadRequest(err.to_string())
            }
            IntakeError::InvalidField { .. } => ApiError::Validation(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}
