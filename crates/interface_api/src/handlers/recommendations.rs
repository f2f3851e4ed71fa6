//! Crown recommendation handlers

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{PatientId, RecommendationId, ToothRecordId};
use domain_claims::{CrownRecommendation, DocumentKind};

use crate::dto::claims::*;
use crate::error::ApiError;
use crate::services;
use crate::AppState;

/// Creates a crown recommendation for a tooth
pub async fn create_recommendation(
    State(state): State<AppState>,
    Json(request): Json<CreateRecommendationRequest>,
) -> Result<(StatusCode, Json<RecommendationResponse>), ApiError> {
    request.validate()?;

    let patient_id = PatientId::from(request.patient_id);
    state.patients().get_by_id(patient_id).await?;
    let tooth = state
        .teeth()
        .get_by_id(ToothRecordId::from(request.tooth_record_id))
        .await?;

    let recommendation =
        CrownRecommendation::for_tooth(patient_id, &tooth, request.reason, request.clinical_note)?;
    state.recommendations().create(&recommendation).await?;

    Ok((StatusCode::CREATED, Json(recommendation.into())))
}

/// Lists recommendations
pub async fn list_recommendations(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecommendationResponse>>, ApiError> {
    let recommendations = state.recommendations().list().await?;
    Ok(Json(recommendations.into_iter().map(Into::into).collect()))
}

/// Gets a recommendation by ID
pub async fn get_recommendation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let recommendation = state
        .recommendations()
        .get_by_id(RecommendationId::from(id))
        .await?;
    Ok(Json(recommendation.into()))
}

/// Submits a recommendation as an insurance claim
///
/// Mints the claim reference (idempotent), transitions the status, then
/// renders and dispatches the claim document. Dispatch failures appear in
/// the response's `dispatch` lines; they never roll back the submission.
pub async fn submit_recommendation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let mut recommendation = state
        .recommendations()
        .get_by_id(RecommendationId::from(id))
        .await?;
    let patient = state
        .patients()
        .get_by_id(recommendation.patient_id)
        .await?;
    services::ensure_claimable(&patient)?;

    let outcome = state.workflow.submit_recommendation(&mut recommendation)?;
    state.recommendations().save(&recommendation).await?;

    let document =
        services::document_for_recommendation(&state, &patient, &recommendation).await;
    let dispatch = services::execute_submission_effects(&state, &document, &outcome.effects).await;

    Ok(Json(SubmissionResponse::from_outcome(&outcome, dispatch)))
}

/// Streams the recommendation's claim document as PDF
///
/// Rendered on demand; nothing is persisted.
pub async fn download_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let recommendation = state
        .recommendations()
        .get_by_id(RecommendationId::from(id))
        .await?;
    let patient = state
        .patients()
        .get_by_id(recommendation.patient_id)
        .await?;

    let document =
        services::document_for_recommendation(&state, &patient, &recommendation).await;
    let bytes = state.renderer.render(&document)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!(
                    "attachment; filename=\"{}\"",
                    DocumentKind::CrownClaim.attachment_name()
                ),
            ),
        ],
        bytes,
    ))
}
