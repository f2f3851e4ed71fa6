//! Claims DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{PatientId, RecommendationId, ToothRecordId, TreatmentId, XrayId};
use domain_claims::{CrownRecommendation, SubmissionOutcome, TreatmentRecord};
use infra_db::StatusCount;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecommendationRequest {
    pub patient_id: Uuid,
    pub tooth_record_id: Uuid,
    #[validate(length(min = 1, max = 500))]
    pub reason: String,
    pub clinical_note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub id: RecommendationId,
    pub patient_id: PatientId,
    pub tooth_record_id: ToothRecordId,
    pub tooth_number: u8,
    pub cdt_code: String,
    pub reason: String,
    pub clinical_note: String,
    pub xray_id: Option<XrayId>,
    pub status: String,
    pub claim_reference: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<CrownRecommendation> for RecommendationResponse {
    fn from(rec: CrownRecommendation) -> Self {
        Self {
            id: rec.id,
            patient_id: rec.patient_id,
            tooth_record_id: rec.tooth_record_id,
            tooth_number: rec.tooth_number.get(),
            cdt_code: rec.cdt_code.as_str().to_string(),
            reason: rec.reason,
            clinical_note: rec.clinical_note,
            xray_id: rec.xray_id,
            status: rec.status.to_string(),
            claim_reference: rec.claim_reference.map(|r| r.as_str().to_string()),
            submitted_at: rec.submitted_at,
            created_at: rec.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTreatmentRequest {
    pub patient_id: Uuid,
    pub tooth_record_id: Option<Uuid>,
    #[validate(length(min = 5, max = 5))]
    pub cdt_code: String,
    pub quadrant: Option<String>,
    pub fee: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct TreatmentResponse {
    pub id: TreatmentId,
    pub patient_id: PatientId,
    pub tooth_record_id: Option<ToothRecordId>,
    pub tooth_number: Option<u8>,
    pub cdt_code: String,
    pub quadrant: Option<String>,
    pub fee: Option<Decimal>,
    pub status: String,
    pub claim_reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl From<TreatmentRecord> for TreatmentResponse {
    fn from(treatment: TreatmentRecord) -> Self {
        Self {
            id: treatment.id,
            patient_id: treatment.patient_id,
            tooth_record_id: treatment.tooth_record_id,
            tooth_number: treatment.tooth_number.map(|t| t.get()),
            cdt_code: treatment.cdt_code.as_str().to_string(),
            quadrant: treatment.quadrant.map(|q| q.abbreviation().to_string()),
            fee: treatment.fee,
            status: treatment.status.to_string(),
            claim_reference: treatment.claim_reference.map(|r| r.as_str().to_string()),
            created_at: treatment.created_at,
            submitted_at: treatment.submitted_at,
        }
    }
}

/// Result of submitting a claim or treatment, including the dispatch
/// status lines shown to clinic staff
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub claim_reference: String,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
    pub dispatch: Vec<String>,
}

impl SubmissionResponse {
    pub fn from_outcome(outcome: &SubmissionOutcome, dispatch: Vec<String>) -> Self {
        Self {
            claim_reference: outcome.reference.as_str().to_string(),
            status: outcome.status.to_string(),
            submitted_at: outcome.submitted_at,
            dispatch,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusCountResponse {
    pub status: String,
    pub count: i64,
}

impl From<StatusCount> for StatusCountResponse {
    fn from(count: StatusCount) -> Self {
        Self {
            status: count.status.to_string(),
            count: count.count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub recommendations_by_status: Vec<StatusCountResponse>,
    pub treatments_by_status: Vec<StatusCountResponse>,
    pub recent_submissions: Vec<TreatmentResponse>,
}
