//! Application services
//!
//! Executes the effects the claims workflow returns as data: rendering
//! claim documents and dispatching them to the claims inbox. Per the
//! error-handling design, dispatch and rendering failures degrade to logged
//! status lines; only persistence failures abort the request.

use std::path::PathBuf;

use tracing::warn;

use core_kernel::XrayId;
use domain_claims::{
    notes, CrownRecommendation, DocumentKind, RecordedEffect, SubmissionEffect, TreatmentRecord,
};
use domain_patient::{Patient, PatientError, PatientValidator};
use infra_documents::ClaimDocument;
use infra_notify::OutboundDocument;

use crate::error::ApiError;
use crate::AppState;

/// Rejects a submission when the patient lacks the attributes the claim
/// paperwork needs (insurance provider, policy number)
///
/// Missing insurance is only a warning at patient intake; it becomes an
/// error here, before any status transition or dispatch happens.
pub fn ensure_claimable(patient: &Patient) -> Result<(), ApiError> {
    let result = PatientValidator::validate_for_claims(patient);
    if result.is_valid {
        Ok(())
    } else {
        Err(PatientError::Validation(result.errors.join("; ")).into())
    }
}

/// Fallback diagnosis text per document kind, used when the record has no
/// tooth record to take a diagnosis from
fn default_diagnosis(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::CrownClaim => "carious lesion requiring full-coverage restoration",
        DocumentKind::SrpPreAuth => "generalized periodontitis",
        DocumentKind::OcclusalGuardPreAuth => "attrition consistent with bruxism",
    }
}

/// Resolves the on-disk path of an x-ray reference, if the file is known
pub async fn xray_path(state: &AppState, xray_id: Option<XrayId>) -> Option<PathBuf> {
    let xray_id = xray_id?;
    match state.xrays().get_by_id(xray_id).await {
        Ok(xray) => Some(PathBuf::from(xray.file_path)),
        Err(e) => {
            warn!(xray = %xray_id, error = %e, "x-ray reference could not be resolved");
            None
        }
    }
}

/// Builds the claim document for a crown recommendation
pub async fn document_for_recommendation(
    state: &AppState,
    patient: &Patient,
    rec: &CrownRecommendation,
) -> ClaimDocument {
    let diagnosis = match state.teeth().get_by_id(rec.tooth_record_id).await {
        Ok(tooth) => Some(tooth.diagnosis),
        Err(e) => {
            warn!(recommendation = %rec.id, error = %e, "tooth record lookup failed for document");
            None
        }
    };

    ClaimDocument {
        kind: DocumentKind::CrownClaim,
        patient_name: patient.name.clone(),
        date_of_birth: patient.date_of_birth,
        insurance_provider: patient.insurance_provider.clone(),
        policy_number: patient.policy_number.clone(),
        cdt_code: rec.cdt_code.clone(),
        tooth_number: Some(rec.tooth_number),
        quadrant: None,
        diagnosis,
        clinical_note: rec.clinical_note.clone(),
        claim_reference: rec.claim_reference.as_ref().map(|r| r.as_str().to_string()),
        xray_path: xray_path(state, rec.xray_id).await,
    }
}

/// Builds the claim document for a treatment record
pub async fn document_for_treatment(
    state: &AppState,
    patient: &Patient,
    treatment: &TreatmentRecord,
    kind: DocumentKind,
) -> ClaimDocument {
    let diagnosis = match treatment.tooth_record_id {
        Some(tooth_id) => match state.teeth().get_by_id(tooth_id).await {
            Ok(tooth) => tooth.diagnosis,
            Err(e) => {
                warn!(treatment = %treatment.id, error = %e, "tooth record lookup failed for document");
                default_diagnosis(kind).to_string()
            }
        },
        None => default_diagnosis(kind).to_string(),
    };

    let clinical_note = match kind {
        DocumentKind::CrownClaim => match treatment.tooth_number {
            Some(tooth) => notes::crown_note(tooth, &diagnosis),
            None => diagnosis.clone(),
        },
        DocumentKind::SrpPreAuth => notes::srp_note(treatment.quadrant, &diagnosis),
        DocumentKind::OcclusalGuardPreAuth => notes::occlusal_guard_note(&diagnosis),
    };

    let latest = match state.xrays().latest_for_patient(patient.id).await {
        Ok(latest) => latest,
        Err(e) => {
            warn!(patient = %patient.id, error = %e, "latest x-ray lookup failed for document");
            None
        }
    };

    ClaimDocument {
        kind,
        patient_name: patient.name.clone(),
        date_of_birth: patient.date_of_birth,
        insurance_provider: patient.insurance_provider.clone(),
        policy_number: patient.policy_number.clone(),
        cdt_code: treatment.cdt_code.clone(),
        tooth_number: treatment.tooth_number,
        quadrant: treatment.quadrant,
        diagnosis: Some(diagnosis),
        clinical_note,
        claim_reference: treatment
            .claim_reference
            .as_ref()
            .map(|r| r.as_str().to_string()),
        xray_path: latest.map(|x| PathBuf::from(x.file_path)),
    }
}

/// Renders a document and dispatches it, returning the staff-facing
/// status line
async fn render_and_dispatch(state: &AppState, document: &ClaimDocument) -> String {
    let bytes = match state.renderer.render(document) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(kind = ?document.kind, error = %e, "document rendering failed");
            return format!("Failed to generate document: {e}");
        }
    };

    let message = OutboundDocument::for_document(document.kind, bytes);
    state.notifier.notify(&message).await.describe()
}

/// Executes the effects of recording a treatment
///
/// Persisting a spawned crown recommendation is part of the write and
/// propagates errors; pre-auth dispatch is best-effort.
pub async fn execute_recorded_effects(
    state: &AppState,
    patient: &Patient,
    treatment: &TreatmentRecord,
    effects: Vec<RecordedEffect>,
) -> Result<Vec<String>, ApiError> {
    let mut status_lines = Vec::new();

    for effect in effects {
        match effect {
            RecordedEffect::CreateCrownRecommendation(rec) => {
                state.recommendations().create(&rec).await?;
                status_lines.push(format!("Crown recommendation {} created.", rec.id));
            }
            RecordedEffect::DispatchSrpPreAuth => {
                let document =
                    document_for_treatment(state, patient, treatment, DocumentKind::SrpPreAuth)
                        .await;
                status_lines.push(render_and_dispatch(state, &document).await);
            }
        }
    }

    Ok(status_lines)
}

/// Executes the effects of a submission against a prebuilt document
pub async fn execute_submission_effects(
    state: &AppState,
    document: &ClaimDocument,
    effects: &[SubmissionEffect],
) -> Vec<String> {
    let mut status_lines = Vec::new();

    for effect in effects {
        match effect {
            SubmissionEffect::RenderAndDispatch(kind) => {
                let mut document = document.clone();
                document.kind = *kind;
                status_lines.push(render_and_dispatch(state, &document).await);
            }
            SubmissionEffect::DispatchOcclusalGuardNote => {
                let message =
                    OutboundDocument::occlusal_guard_note(notes::occlusal_guard_delivery_note());
                status_lines.push(state.notifier.notify(&message).await.describe());
            }
        }
    }

    status_lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn patient() -> Patient {
        Patient::new(
            "Jane Doe",
            NaiveDate::from_ymd_opt(1985, 6, 15).unwrap(),
            "Delta Dental",
            "DD-4417-8892",
        )
    }

    #[test]
    fn insured_patient_is_claimable() {
        assert!(ensure_claimable(&patient()).is_ok());
    }

    #[test]
    fn missing_insurance_blocks_submission() {
        let mut patient = patient();
        patient.insurance_provider = String::new();
        patient.policy_number = String::new();

        let err = ensure_claimable(&patient).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(err.to_string().contains("insurance provider"));
    }
}
