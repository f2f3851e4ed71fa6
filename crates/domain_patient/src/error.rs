//! Patient domain errors

use thiserror::Error;

/// Errors that can occur in the patient domain
#[derive(Debug, Error)]
pub enum PatientError {
    #[error("Patient not found: {0}")]
    PatientNotFound(String),

    #[error("Tooth record not found: {0}")]
    ToothRecordNotFound(String),

    #[error("X-ray not found: {0}")]
    XrayNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Core(#[from] core_kernel::CoreError),
}
