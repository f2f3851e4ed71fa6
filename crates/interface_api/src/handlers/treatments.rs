//! Treatment handlers

use std::str::FromStr;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{CdtCode, PatientId, Quadrant, ToothRecordId, TreatmentId};
use domain_claims::{DocumentKind, NewTreatment, TreatmentRecord};
use domain_patient::ToothRecord;

use crate::dto::claims::*;
use crate::error::ApiError;
use crate::services;
use crate::AppState;

/// Response to recording a treatment: the record plus the status lines of
/// any effects that ran (crown recommendation creation, SRP pre-auth
/// dispatch)
#[derive(Debug, serde::Serialize)]
pub struct RecordedTreatmentResponse {
    #[serde(flatten)]
    pub treatment: TreatmentResponse,
    pub effects: Vec<String>,
}

/// Records a treatment
pub async fn create_treatment(
    State(state): State<AppState>,
    Json(request): Json<CreateTreatmentRequest>,
) -> Result<(StatusCode, Json<RecordedTreatmentResponse>), ApiError> {
    request.validate()?;

    let patient_id = PatientId::from(request.patient_id);
    let cdt_code = CdtCode::from_str(&request.cdt_code)?;
    let quadrant = request
        .quadrant
        .as_deref()
        .map(Quadrant::from_str)
        .transpose()?;

    let tooth = match request.tooth_record_id {
        Some(id) => Some(state.teeth().get_by_id(ToothRecordId::from(id)).await?),
        None => None,
    };

    record(state, patient_id, cdt_code, quadrant, tooth, request.fee).await
}

/// Shared recording path for the clinic endpoint and programmatic intake
pub(crate) async fn record(
    state: AppState,
    patient_id: PatientId,
    cdt_code: CdtCode,
    quadrant: Option<Quadrant>,
    tooth: Option<ToothRecord>,
    fee: Option<rust_decimal::Decimal>,
) -> Result<(StatusCode, Json<RecordedTreatmentResponse>), ApiError> {
    let patient = state.patients().get_by_id(patient_id).await?;
    let latest_xray = state.xrays().latest_for_patient(patient_id).await?;

    let input = NewTreatment {
        patient_id,
        tooth_record_id: tooth.as_ref().map(|t| t.id),
        tooth_number: tooth.as_ref().map(|t| t.tooth_number),
        cdt_code,
        quadrant,
        fee,
    };

    let (treatment, effects) =
        state
            .workflow
            .record_treatment(input, tooth.as_ref(), latest_xray.as_ref())?;
    state.treatments().create(&treatment).await?;

    let effect_lines =
        services::execute_recorded_effects(&state, &patient, &treatment, effects).await?;

    Ok((
        StatusCode::CREATED,
        Json(RecordedTreatmentResponse {
            treatment: treatment.into(),
            effects: effect_lines,
        }),
    ))
}

/// Lists treatments
pub async fn list_treatments(
    State(state): State<AppState>,
) -> Result<Json<Vec<TreatmentResponse>>, ApiError> {
    let treatments = state.treatments().list().await?;
    Ok(Json(treatments.into_iter().map(Into::into).collect()))
}

/// Gets a treatment by ID
pub async fn get_treatment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TreatmentResponse>, ApiError> {
    let treatment = state.treatments().get_by_id(TreatmentId::from(id)).await?;
    Ok(Json(treatment.into()))
}

/// Submits a treatment as a claim or pre-authorization
pub async fn submit_treatment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let mut treatment = state.treatments().get_by_id(TreatmentId::from(id)).await?;
    let patient = state.patients().get_by_id(treatment.patient_id).await?;
    services::ensure_claimable(&patient)?;

    let outcome = state.workflow.submit_treatment(&mut treatment)?;
    state.treatments().save(&treatment).await?;

    let document = services::document_for_treatment(
        &state,
        &patient,
        &treatment,
        document_kind(&treatment),
    )
    .await;
    let dispatch = services::execute_submission_effects(&state, &document, &outcome.effects).await;

    Ok(Json(SubmissionResponse::from_outcome(&outcome, dispatch)))
}

/// Streams the treatment's document as PDF, rendered on demand
pub async fn download_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let treatment = state.treatments().get_by_id(TreatmentId::from(id)).await?;
    let patient = state.patients().get_by_id(treatment.patient_id).await?;

    let kind = document_kind(&treatment);
    let document = services::document_for_treatment(&state, &patient, &treatment, kind).await;
    let bytes = state.renderer.render(&document)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", kind.attachment_name()),
            ),
        ],
        bytes,
    ))
}

/// The document kind a treatment's paperwork uses
fn document_kind(treatment: &TreatmentRecord) -> DocumentKind {
    match &treatment.cdt_code {
        CdtCode::OcclusalGuard => DocumentKind::OcclusalGuardPreAuth,
        code if code.is_srp() => DocumentKind::SrpPreAuth,
        _ => DocumentKind::CrownClaim,
    }
}
