//! Repository implementations for domain aggregates
//!
//! Each repository encapsulates the SQL for one aggregate and maps between
//! database rows and domain types. Row structs mirror the table layout;
//! conversion to domain types happens at the repository boundary so callers
//! only ever see domain values.

use std::str::FromStr;

use crate::error::DatabaseError;

pub mod patients;
pub mod recommendations;
pub mod teeth;
pub mod treatments;
pub mod xrays;

pub use patients::PatientRepository;
pub use recommendations::RecommendationRepository;
pub use teeth::ToothRepository;
pub use treatments::TreatmentRepository;
pub use xrays::XrayRepository;

/// Claim status as stored in the `claim_status` PostgreSQL enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "claim_status", rename_all = "snake_case")]
pub enum ClaimStatusRow {
    Pending,
    Submitted,
    Approved,
    Denied,
    Paid,
}

impl From<domain_claims::ClaimStatus> for ClaimStatusRow {
    fn from(status: domain_claims::ClaimStatus) -> Self {
        match status {
            domain_claims::ClaimStatus::Pending => ClaimStatusRow::Pending,
            domain_claims::ClaimStatus::Submitted => ClaimStatusRow::Submitted,
            domain_claims::ClaimStatus::Approved => ClaimStatusRow::Approved,
            domain_claims::ClaimStatus::Denied => ClaimStatusRow::Denied,
            domain_claims::ClaimStatus::Paid => ClaimStatusRow::Paid,
        }
    }
}

impl From<ClaimStatusRow> for domain_claims::ClaimStatus {
    fn from(status: ClaimStatusRow) -> Self {
        match status {
            ClaimStatusRow::Pending => domain_claims::ClaimStatus::Pending,
            ClaimStatusRow::Submitted => domain_claims::ClaimStatus::Submitted,
            ClaimStatusRow::Approved => domain_claims::ClaimStatus::Approved,
            ClaimStatusRow::Denied => domain_claims::ClaimStatus::Denied,
            ClaimStatusRow::Paid => domain_claims::ClaimStatus::Paid,
        }
    }
}

/// A per-status count, used by the dashboard summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCount {
    pub status: domain_claims::ClaimStatus,
    pub count: i64,
}

pub(crate) fn tooth_number_from_db(value: i16) -> Result<core_kernel::ToothNumber, DatabaseError> {
    let raw = u8::try_from(value)
        .map_err(|_| DatabaseError::SerializationError(format!("tooth number {value}")))?;
    core_kernel::ToothNumber::new(raw)
        .map_err(|e| DatabaseError::SerializationError(e.to_string()))
}

pub(crate) fn quadrant_from_db(value: &str) -> Result<core_kernel::Quadrant, DatabaseError> {
    core_kernel::Quadrant::from_str(value)
        .map_err(|e| DatabaseError::SerializationError(e.to_string()))
}

pub(crate) fn cdt_code_from_db(value: &str) -> Result<core_kernel::CdtCode, DatabaseError> {
    core_kernel::CdtCode::from_str(value)
        .map_err(|e| DatabaseError::SerializationError(e.to_string()))
}

pub(crate) fn claim_reference_from_db(
    value: &str,
) -> Result<domain_claims::ClaimReference, DatabaseError> {
    domain_claims::ClaimReference::from_str(value)
        .map_err(|e| DatabaseError::SerializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_claims::ClaimStatus;

    #[test]
    fn test_status_round_trip() {
        for status in [
            ClaimStatus::Pending,
            ClaimStatus::Submitted,
            ClaimStatus::Approved,
            ClaimStatus::Denied,
            ClaimStatus::Paid,
        ] {
            let row: ClaimStatusRow = status.into();
            let back: ClaimStatus = row.into();
            assert_eq!(status, back);
        }
    }

    #[test]
    fn test_tooth_number_mapping_rejects_out_of_range() {
        assert!(tooth_number_from_db(14).is_ok());
        assert!(tooth_number_from_db(0).is_err());
        assert!(tooth_number_from_db(33).is_err());
        assert!(tooth_number_from_db(-1).is_err());
    }
}
