//! Claim submission workflow
//!
//! The workflow is where procedure codes meet paperwork. It owns two
//! decisions:
//!
//! - what happens when a treatment is *recorded* (crown treatments spawn a
//!   crown recommendation, SRP treatments request a pre-auth dispatch), and
//! - what happens when a record is *submitted* (claim reference minting,
//!   status transition, optional adjudication, document/notification
//!   effects).
//!
//! Side effects are returned as values ([`RecordedEffect`],
//! [`SubmissionEffect`]) rather than fired from persistence hooks, so every
//! consequence of a write is visible at the call site and reproducible in
//! tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use core_kernel::CdtCode;
use domain_patient::{PatientXray, ToothRecord};

use crate::adjudication::{AdjudicationDecision, Adjudicator};
use crate::error::ClaimError;
use crate::recommendation::CrownRecommendation;
use crate::reference::ClaimReference;
use crate::status::ClaimStatus;
use crate::treatment::{NewTreatment, TreatmentRecord};

/// The document kinds the practice generates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Insurance claim for a completed crown
    CrownClaim,
    /// Pre-authorization for scaling and root planing
    SrpPreAuth,
    /// Pre-authorization for an occlusal guard
    OcclusalGuardPreAuth,
}

impl DocumentKind {
    /// Title printed on the document and used in notification subjects
    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::CrownClaim => "Dental Claim Form - Crown Procedure",
            DocumentKind::SrpPreAuth => "Pre-Authorization - Scaling and Root Planing",
            DocumentKind::OcclusalGuardPreAuth => "Pre-Authorization - Occlusal Guard",
        }
    }

    /// File name used for the attachment
    pub fn attachment_name(&self) -> &'static str {
        match self {
            DocumentKind::CrownClaim => "crown_claim.pdf",
            DocumentKind::SrpPreAuth => "srp_preauth.pdf",
            DocumentKind::OcclusalGuardPreAuth => "occlusal_guard_preauth.pdf",
        }
    }
}

/// Effect requested by recording a treatment
#[derive(Debug, Clone)]
pub enum RecordedEffect {
    /// Persist a crown recommendation mirroring a crown-coded treatment
    CreateCrownRecommendation(Box<CrownRecommendation>),
    /// Render and dispatch an SRP pre-authorization for the new treatment
    DispatchSrpPreAuth,
}

/// Effect requested by submitting a claim or treatment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionEffect {
    /// Render the document and dispatch it to the claims inbox
    RenderAndDispatch(DocumentKind),
    /// Occlusal-guard submissions additionally send the delivery note
    DispatchOcclusalGuardNote,
}

/// Result of a submission
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub reference: ClaimReference,
    pub status: ClaimStatus,
    pub submitted_at: DateTime<Utc>,
    pub effects: Vec<SubmissionEffect>,
}

/// The claim submission workflow, with adjudication injected
#[derive(Clone)]
pub struct ClaimsWorkflow {
    adjudicator: Arc<dyn Adjudicator>,
}

impl ClaimsWorkflow {
    pub fn new(adjudicator: Arc<dyn Adjudicator>) -> Self {
        Self { adjudicator }
    }

    /// Records a treatment and derives its creation-time effects
    ///
    /// A crown-coded (D2740) treatment requires a tooth record and yields
    /// exactly one [`RecordedEffect::CreateCrownRecommendation`] for the
    /// same patient and tooth; an SRP-coded treatment (D4341/D4342) yields a
    /// pre-auth dispatch effect.
    ///
    /// # Errors
    ///
    /// Returns [`ClaimError::ToothRequired`] for a crown treatment without a
    /// tooth record, or [`ClaimError::ToothPatientMismatch`] when the tooth
    /// belongs to another patient.
    pub fn record_treatment(
        &self,
        input: NewTreatment,
        tooth: Option<&ToothRecord>,
        latest_xray: Option<&PatientXray>,
    ) -> Result<(TreatmentRecord, Vec<RecordedEffect>), ClaimError> {
        if let Some(tooth) = tooth {
            if tooth.patient_id != input.patient_id {
                return Err(ClaimError::ToothPatientMismatch {
                    tooth: tooth.id.to_string(),
                    patient: input.patient_id.to_string(),
                });
            }
        }

        let treatment = TreatmentRecord::new(input);
        let mut effects = Vec::new();

        match &treatment.cdt_code {
            CdtCode::PorcelainCrown => {
                let tooth = tooth.ok_or_else(|| {
                    ClaimError::ToothRequired(treatment.cdt_code.as_str().to_string())
                })?;
                let mut recommendation = CrownRecommendation::for_tooth(
                    treatment.patient_id,
                    tooth,
                    "Auto-created from crown treatment record",
                    None,
                )?;
                // Prefer the freshest x-ray over the one on the tooth record
                if let Some(xray) = latest_xray {
                    recommendation.xray_id = Some(xray.id);
                }
                info!(
                    treatment = %treatment.id,
                    recommendation = %recommendation.id,
                    "crown treatment recorded; crown recommendation created"
                );
                effects.push(RecordedEffect::CreateCrownRecommendation(Box::new(
                    recommendation,
                )));
            }
            code if code.is_srp() => {
                info!(treatment = %treatment.id, code = %code, "SRP treatment recorded; pre-auth requested");
                effects.push(RecordedEffect::DispatchSrpPreAuth);
            }
            _ => {}
        }

        Ok((treatment, effects))
    }

    /// Submits a treatment record
    ///
    /// Mints the claim reference if absent (never replaces an assigned one),
    /// transitions Pending -> Submitted, lets the adjudicator optionally
    /// resolve the claim, stamps the submission time, and returns the
    /// document/notification effects for the procedure code.
    pub fn submit_treatment(
        &self,
        treatment: &mut TreatmentRecord,
    ) -> Result<SubmissionOutcome, ClaimError> {
        treatment.status.transition_to(ClaimStatus::Submitted)?;
        let reference = treatment.ensure_claim_reference();

        treatment.status = self.adjudicate();

        let now = Utc::now();
        treatment.submitted_at = Some(now);

        let effects = submission_effects(&treatment.cdt_code);
        info!(
            treatment = %treatment.id,
            reference = %reference,
            status = %treatment.status,
            "treatment submitted"
        );

        Ok(SubmissionOutcome {
            reference,
            status: treatment.status,
            submitted_at: now,
            effects,
        })
    }

    /// Submits a crown recommendation
    pub fn submit_recommendation(
        &self,
        recommendation: &mut CrownRecommendation,
    ) -> Result<SubmissionOutcome, ClaimError> {
        recommendation.status.transition_to(ClaimStatus::Submitted)?;
        let reference = recommendation.ensure_claim_reference();

        recommendation.status = self.adjudicate();

        let now = Utc::now();
        recommendation.submitted_at = Some(now);
        recommendation.updated_at = now;

        info!(
            recommendation = %recommendation.id,
            reference = %reference,
            status = %recommendation.status,
            "crown recommendation submitted"
        );

        Ok(SubmissionOutcome {
            reference,
            status: recommendation.status,
            submitted_at: now,
            effects: vec![SubmissionEffect::RenderAndDispatch(DocumentKind::CrownClaim)],
        })
    }

    fn adjudicate(&self) -> ClaimStatus {
        match self.adjudicator.decide() {
            AdjudicationDecision::Approved => ClaimStatus::Approved,
            AdjudicationDecision::Denied => ClaimStatus::Denied,
            AdjudicationDecision::Deferred => ClaimStatus::Submitted,
        }
    }
}

/// Maps a procedure code to the documents its submission produces
fn submission_effects(code: &CdtCode) -> Vec<SubmissionEffect> {
    match code {
        CdtCode::PorcelainCrown => {
            vec![SubmissionEffect::RenderAndDispatch(DocumentKind::CrownClaim)]
        }
        code if code.is_srp() => {
            vec![SubmissionEffect::RenderAndDispatch(DocumentKind::SrpPreAuth)]
        }
        CdtCode::OcclusalGuard => vec![
            SubmissionEffect::RenderAndDispatch(DocumentKind::OcclusalGuardPreAuth),
            SubmissionEffect::DispatchOcclusalGuardNote,
        ],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjudication::NullAdjudicator;
    use core_kernel::{PatientId, ToothNumber};

    fn workflow() -> ClaimsWorkflow {
        ClaimsWorkflow::new(Arc::new(NullAdjudicator))
    }

    fn crown_input(patient_id: PatientId, tooth: &ToothRecord) -> NewTreatment {
        NewTreatment {
            patient_id,
            tooth_record_id: Some(tooth.id),
            tooth_number: Some(tooth.tooth_number),
            cdt_code: CdtCode::PorcelainCrown,
            quadrant: None,
            fee: None,
        }
    }

    #[test]
    fn crown_treatment_spawns_exactly_one_recommendation() {
        let patient_id = PatientId::new();
        let tooth = ToothRecord::new(
            patient_id,
            ToothNumber::new(14).unwrap(),
            "deep caries",
            None,
        );

        let (treatment, effects) = workflow()
            .record_treatment(crown_input(patient_id, &tooth), Some(&tooth), None)
            .unwrap();

        assert_eq!(effects.len(), 1);
        match &effects[0] {
            RecordedEffect::CreateCrownRecommendation(rec) => {
                assert_eq!(rec.patient_id, treatment.patient_id);
                assert_eq!(rec.tooth_record_id, tooth.id);
                assert_eq!(rec.tooth_number, tooth.tooth_number);
            }
            other => panic!("unexpected effect: {other:?}"),
        }
    }

    #[test]
    fn crown_treatment_without_tooth_is_rejected() {
        let result = workflow().record_treatment(
            NewTreatment {
                patient_id: PatientId::new(),
                tooth_record_id: None,
                tooth_number: None,
                cdt_code: CdtCode::PorcelainCrown,
                quadrant: None,
                fee: None,
            },
            None,
            None,
        );
        assert!(matches!(result, Err(ClaimError::ToothRequired(_))));
    }

    #[test]
    fn srp_treatment_requests_preauth_dispatch() {
        let (_, effects) = workflow()
            .record_treatment(
                NewTreatment {
                    patient_id: PatientId::new(),
                    tooth_record_id: None,
                    tooth_number: None,
                    cdt_code: CdtCode::SrpFourOrMoreTeeth,
                    quadrant: Some(core_kernel::Quadrant::LowerLeft),
                    fee: None,
                },
                None,
                None,
            )
            .unwrap();
        assert!(matches!(effects[0], RecordedEffect::DispatchSrpPreAuth));
    }

    #[test]
    fn submit_is_idempotent_on_reference_and_rejects_resubmission() {
        let workflow = workflow();
        let (mut treatment, _) = workflow
            .record_treatment(
                NewTreatment {
                    patient_id: PatientId::new(),
                    tooth_record_id: None,
                    tooth_number: None,
                    cdt_code: CdtCode::OcclusalGuard,
                    quadrant: None,
                    fee: None,
                },
                None,
                None,
            )
            .unwrap();

        let outcome = workflow.submit_treatment(&mut treatment).unwrap();
        assert_eq!(outcome.reference.as_str().len(), 8);
        assert_eq!(treatment.status, ClaimStatus::Submitted);

        let kept = outcome.reference.clone();
        let second = workflow.submit_treatment(&mut treatment);
        assert!(second.is_err());
        assert_eq!(treatment.claim_reference, Some(kept));
    }

    #[test]
    fn occlusal_guard_submission_adds_delivery_note_effect() {
        let workflow = workflow();
        let (mut treatment, _) = workflow
            .record_treatment(
                NewTreatment {
                    patient_id: PatientId::new(),
                    tooth_record_id: None,
                    tooth_number: None,
                    cdt_code: CdtCode::OcclusalGuard,
                    quadrant: None,
                    fee: None,
                },
                None,
                None,
            )
            .unwrap();

        let outcome = workflow.submit_treatment(&mut treatment).unwrap();
        assert_eq!(
            outcome.effects,
            vec![
                SubmissionEffect::RenderAndDispatch(DocumentKind::OcclusalGuardPreAuth),
                SubmissionEffect::DispatchOcclusalGuardNote,
            ]
        );
    }
}
