//! Patient handlers
//!
//! Patients, their per-tooth records, x-ray uploads, and the classify
//! endpoint over the latest upload.

use std::path::{Path as FsPath, PathBuf};

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{PatientId, ToothNumber, XrayId};
use domain_patient::{Patient, PatientValidator, PatientXray, ToothRecord};

use crate::dto::patients::*;
use crate::error::ApiError;
use crate::AppState;

/// Creates a patient
pub async fn create_patient(
    State(state): State<AppState>,
    Json(request): Json<CreatePatientRequest>,
) -> Result<(StatusCode, Json<PatientResponse>), ApiError> {
    request.validate()?;

    let patient = Patient::new(
        request.name,
        request.date_of_birth,
        request.insurance_provider,
        request.policy_number,
    );

    let result = PatientValidator::validate(&patient);
    if !result.is_valid {
        return Err(ApiError::Validation(result.errors.join("; ")));
    }

    state.patients().create(&patient).await?;
    Ok((StatusCode::CREATED, Json(patient.into())))
}

/// Lists patients
pub async fn list_patients(
    State(state): State<AppState>,
) -> Result<Json<Vec<PatientResponse>>, ApiError> {
    let patients = state.patients().list().await?;
    Ok(Json(patients.into_iter().map(Into::into).collect()))
}

/// Gets a patient by ID
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PatientResponse>, ApiError> {
    let patient = state.patients().get_by_id(PatientId::from(id)).await?;
    Ok(Json(patient.into()))
}

/// Records an observation of a tooth
///
/// A second observation of the same tooth overwrites the first; the
/// response carries the canonical record either way.
pub async fn create_tooth_record(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateToothRecordRequest>,
) -> Result<(StatusCode, Json<ToothRecordResponse>), ApiError> {
    request.validate()?;
    let patient_id = PatientId::from(id);

    // 404 before constraint errors when the patient doesn't exist
    state.patients().get_by_id(patient_id).await?;

    let tooth_number = ToothNumber::new(request.tooth_number)?;
    let record = ToothRecord::new(
        patient_id,
        tooth_number,
        request.diagnosis,
        request.xray_id.map(XrayId::from),
    );

    let stored = state.teeth().upsert(&record).await?;
    Ok((StatusCode::CREATED, Json(stored.into())))
}

/// Lists a patient's tooth records
pub async fn list_tooth_records(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ToothRecordResponse>>, ApiError> {
    let records = state.teeth().find_by_patient(PatientId::from(id)).await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// Uploads an x-ray image (multipart, field name `file`)
pub async fn upload_xray(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<XrayResponse>), ApiError> {
    let patient_id = PatientId::from(id);
    state.patients().get_by_id(patient_id).await?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let original_name = field
                .file_name()
                .map(sanitize_file_name)
                .unwrap_or_else(|| "xray.png".to_string());
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            upload = Some((original_name, content_type, bytes));
        }
    }

    let (original_name, content_type, bytes) =
        upload.ok_or_else(|| ApiError::BadRequest("missing 'file' field".to_string()))?;
    if bytes.is_empty() {
        return Err(ApiError::BadRequest("uploaded file is empty".to_string()));
    }

    let directory = PathBuf::from(&state.config.upload_dir).join(patient_id.to_string());
    tokio::fs::create_dir_all(&directory)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let stored_name = format!("{}_{}", Uuid::new_v4().simple(), original_name);
    let file_path = directory.join(stored_name);
    tokio::fs::write(&file_path, &bytes)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let xray = PatientXray::new(
        patient_id,
        file_path.to_string_lossy().to_string(),
        original_name,
        content_type,
    );
    state.xrays().create(&xray).await?;

    Ok((StatusCode::CREATED, Json(xray.into())))
}

/// Lists a patient's x-rays, newest first
pub async fn list_xrays(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<XrayResponse>>, ApiError> {
    let xrays = state.xrays().find_by_patient(PatientId::from(id)).await?;
    Ok(Json(xrays.into_iter().map(Into::into).collect()))
}

/// Runs the abscess classifier on the patient's latest x-ray
///
/// 404 when the patient has no uploads. A failed classification surfaces
/// as the `"Error"` label with confidence 0.0, never as an HTTP error.
pub async fn classify_latest_xray(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClassificationResponse>, ApiError> {
    let patient_id = PatientId::from(id);
    let xray = state
        .xrays()
        .latest_for_patient(patient_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no x-rays on file for {patient_id}")))?;

    let prediction = state.classifier.predict(FsPath::new(&xray.file_path));

    Ok(Json(ClassificationResponse {
        xray_id: xray.id,
        label: prediction.label.to_string(),
        confidence: prediction.confidence,
        suggested_diagnosis: prediction.suggested_diagnosis().map(str::to_string),
    }))
}

/// Strips path components and shell-hostile characters from an uploaded
/// file name
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\temp\\scan.png"), "scan.png");
        assert_eq!(sanitize_file_name("tooth 14 (1).png"), "tooth141.png");
        assert_eq!(sanitize_file_name("///"), "upload");
    }
}
