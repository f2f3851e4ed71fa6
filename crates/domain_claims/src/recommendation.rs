//! Crown recommendation aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CdtCode, PatientId, RecommendationId, ToothNumber, ToothRecordId, XrayId};
use domain_patient::ToothRecord;

use crate::error::ClaimError;
use crate::notes;
use crate::reference::ClaimReference;
use crate::status::ClaimStatus;

/// A claim for a crown procedure on a specific tooth
///
/// Created either manually by clinic staff or automatically when a
/// crown-coded treatment is recorded. The tooth must belong to the same
/// patient as the recommendation; the constructor enforces it and the
/// schema backs it with a composite foreign key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrownRecommendation {
    /// Unique identifier
    pub id: RecommendationId,
    /// Patient the claim is for
    pub patient_id: PatientId,
    /// Tooth record the claim references
    pub tooth_record_id: ToothRecordId,
    /// Tooth position, denormalized for paperwork
    pub tooth_number: ToothNumber,
    /// Procedure code, fixed to D2740 for crown claims
    pub cdt_code: CdtCode,
    /// Free-text reason given by the clinician
    pub reason: String,
    /// Clinical note included in the claim document
    pub clinical_note: String,
    /// X-ray attached to the claim, when one exists
    pub xray_id: Option<XrayId>,
    /// Status
    pub status: ClaimStatus,
    /// Claim reference, assigned on first submission
    pub claim_reference: Option<ClaimReference>,
    /// Submission timestamp
    pub submitted_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl CrownRecommendation {
    /// Creates a recommendation for a tooth
    ///
    /// When no clinical note is supplied, one is generated from the tooth's
    /// diagnosis; the tooth's x-ray (if any) is attached.
    ///
    /// # Errors
    ///
    /// Returns [`ClaimError::ToothPatientMismatch`] when the tooth record
    /// belongs to a different patient.
    pub fn for_tooth(
        patient_id: PatientId,
        tooth: &ToothRecord,
        reason: impl Into<String>,
        clinical_note: Option<String>,
    ) -> Result<Self, ClaimError> {
        if tooth.patient_id != patient_id {
            return Err(ClaimError::ToothPatientMismatch {
                tooth: tooth.id.to_string(),
                patient: patient_id.to_string(),
            });
        }

        let now = Utc::now();
        let clinical_note = clinical_note
            .filter(|note| !note.trim().is_empty())
            .unwrap_or_else(|| notes::crown_note(tooth.tooth_number, &tooth.diagnosis));

        Ok(Self {
            id: RecommendationId::new_v7(),
            patient_id,
            tooth_record_id: tooth.id,
            tooth_number: tooth.tooth_number,
            cdt_code: CdtCode::PorcelainCrown,
            reason: reason.into(),
            clinical_note,
            xray_id: tooth.xray_id,
            status: ClaimStatus::Pending,
            claim_reference: None,
            submitted_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Assigns the claim reference if none exists, returning the stable value
    pub fn ensure_claim_reference(&mut self) -> ClaimReference {
        match &self.claim_reference {
            Some(reference) => reference.clone(),
            None => {
                let reference = ClaimReference::mint();
                self.claim_reference = Some(reference.clone());
                self.updated_at = Utc::now();
                reference
            }
        }
    }

    /// Updates the status
    pub fn update_status(&mut self, status: ClaimStatus) -> Result<(), ClaimError> {
        self.status.transition_to(status)?;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::ToothNumber;

    fn tooth_for(patient_id: PatientId) -> ToothRecord {
        ToothRecord::new(
            patient_id,
            ToothNumber::new(14).unwrap(),
            "deep caries",
            None,
        )
    }

    #[test]
    fn auto_note_comes_from_diagnosis() {
        let patient_id = PatientId::new();
        let tooth = tooth_for(patient_id);
        let rec = CrownRecommendation::for_tooth(patient_id, &tooth, "restoration", None).unwrap();
        assert!(rec.clinical_note.contains("Tooth #14 presents with deep caries"));
        assert_eq!(rec.cdt_code, CdtCode::PorcelainCrown);
        assert_eq!(rec.status, ClaimStatus::Pending);
    }

    #[test]
    fn explicit_note_is_kept() {
        let patient_id = PatientId::new();
        let tooth = tooth_for(patient_id);
        let rec = CrownRecommendation::for_tooth(
            patient_id,
            &tooth,
            "restoration",
            Some("custom note".to_string()),
        )
        .unwrap();
        assert_eq!(rec.clinical_note, "custom note");
    }

    #[test]
    fn mismatched_patient_is_rejected() {
        let tooth = tooth_for(PatientId::new());
        let result = CrownRecommendation::for_tooth(PatientId::new(), &tooth, "restoration", None);
        assert!(matches!(
            result,
            Err(ClaimError::ToothPatientMismatch { .. })
        ));
    }

    #[test]
    fn claim_reference_is_stable() {
        let patient_id = PatientId::new();
        let tooth = tooth_for(patient_id);
        let mut rec =
            CrownRecommendation::for_tooth(patient_id, &tooth, "restoration", None).unwrap();

        let first = rec.ensure_claim_reference();
        let second = rec.ensure_claim_reference();
        assert_eq!(first, second);
    }
}
