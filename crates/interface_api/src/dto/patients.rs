//! Patient DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{PatientId, ToothRecordId, XrayId};
use domain_patient::{Patient, PatientXray, ToothRecord};

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePatientRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub date_of_birth: NaiveDate,
    #[validate(length(max = 200))]
    pub insurance_provider: String,
    #[validate(length(max = 100))]
    pub policy_number: String,
}

#[derive(Debug, Serialize)]
pub struct PatientResponse {
    pub id: PatientId,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub insurance_provider: String,
    pub policy_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Patient> for PatientResponse {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            name: patient.name,
            date_of_birth: patient.date_of_birth,
            insurance_provider: patient.insurance_provider,
            policy_number: patient.policy_number,
            created_at: patient.created_at,
            updated_at: patient.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateToothRecordRequest {
    pub tooth_number: u8,
    #[validate(length(min = 1))]
    pub diagnosis: String,
    pub xray_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ToothRecordResponse {
    pub id: ToothRecordId,
    pub patient_id: PatientId,
    pub tooth_number: u8,
    pub diagnosis: String,
    pub xray_id: Option<XrayId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ToothRecord> for ToothRecordResponse {
    fn from(record: ToothRecord) -> Self {
        Self {
            id: record.id,
            patient_id: record.patient_id,
            tooth_number: record.tooth_number.get(),
            diagnosis: record.diagnosis,
            xray_id: record.xray_id,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct XrayResponse {
    pub id: XrayId,
    pub patient_id: PatientId,
    pub original_name: String,
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
}

impl From<PatientXray> for XrayResponse {
    fn from(xray: PatientXray) -> Self {
        Self {
            id: xray.id,
            patient_id: xray.patient_id,
            original_name: xray.original_name,
            content_type: xray.content_type,
            uploaded_at: xray.uploaded_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClassificationResponse {
    pub xray_id: XrayId,
    pub label: String,
    pub confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_diagnosis: Option<String>,
}
