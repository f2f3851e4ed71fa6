//! Claims domain errors

use thiserror::Error;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim not found: {0}")]
    ClaimNotFound(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Tooth record {tooth} does not belong to patient {patient}")]
    ToothPatientMismatch { tooth: String, patient: String },

    #[error("Procedure {0} requires a tooth record")]
    ToothRequired(String),

    #[error("Invalid claim reference: {0}")]
    InvalidClaimReference(String),

    #[error(transparent)]
    Core(#[from] core_kernel::CoreError),
}
