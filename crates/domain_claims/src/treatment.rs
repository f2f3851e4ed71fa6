//! Treatment record aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CdtCode, PatientId, Quadrant, ToothNumber, ToothRecordId, TreatmentId};

use crate::reference::ClaimReference;
use crate::status::ClaimStatus;

/// Input for recording a new treatment
#[derive(Debug, Clone)]
pub struct NewTreatment {
    pub patient_id: PatientId,
    pub tooth_record_id: Option<ToothRecordId>,
    pub tooth_number: Option<ToothNumber>,
    pub cdt_code: CdtCode,
    pub quadrant: Option<Quadrant>,
    pub fee: Option<Decimal>,
}

/// A generic procedure event against a patient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreatmentRecord {
    /// Unique identifier
    pub id: TreatmentId,
    /// Patient treated
    pub patient_id: PatientId,
    /// Tooth treated, when the procedure is tooth-scoped
    pub tooth_record_id: Option<ToothRecordId>,
    /// Tooth position, denormalized for paperwork
    pub tooth_number: Option<ToothNumber>,
    /// CDT procedure code
    pub cdt_code: CdtCode,
    /// Quadrant, for quadrant-scoped procedures (SRP)
    pub quadrant: Option<Quadrant>,
    /// Fee charged for the procedure
    pub fee: Option<Decimal>,
    /// Claim status
    pub status: ClaimStatus,
    /// Claim reference, assigned on first submission
    pub claim_reference: Option<ClaimReference>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Submission timestamp
    pub submitted_at: Option<DateTime<Utc>>,
}

impl TreatmentRecord {
    /// Creates a new treatment record in the Pending state
    pub fn new(input: NewTreatment) -> Self {
        Self {
            id: TreatmentId::new_v7(),
            patient_id: input.patient_id,
            tooth_record_id: input.tooth_record_id,
            tooth_number: input.tooth_number,
            cdt_code: input.cdt_code,
            quadrant: input.quadrant,
            fee: input.fee,
            status: ClaimStatus::Pending,
            claim_reference: None,
            created_at: Utc::now(),
            submitted_at: None,
        }
    }

    /// Assigns the claim reference if none exists, returning the stable value
    pub fn ensure_claim_reference(&mut self) -> ClaimReference {
        match &self.claim_reference {
            Some(reference) => reference.clone(),
            None => {
                let reference = ClaimReference::mint();
                self.claim_reference = Some(reference.clone());
                reference
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn new_treatment_is_pending_without_reference() {
        let treatment = TreatmentRecord::new(NewTreatment {
            patient_id: PatientId::new(),
            tooth_record_id: None,
            tooth_number: None,
            cdt_code: CdtCode::OcclusalGuard,
            quadrant: None,
            fee: Some(dec!(650.00)),
        });

        assert_eq!(treatment.status, ClaimStatus::Pending);
        assert!(treatment.claim_reference.is_none());
        assert!(treatment.submitted_at.is_none());
    }
}
