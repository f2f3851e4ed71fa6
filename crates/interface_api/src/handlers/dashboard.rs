//! Dashboard handler

use axum::{extract::State, Json};

use crate::dto::claims::{DashboardResponse, StatusCountResponse};
use crate::error::ApiError;
use crate::AppState;

const RECENT_SUBMISSIONS: i64 = 10;

/// Counts by status for both claim kinds plus the most recent submissions
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardResponse>, ApiError> {
    let recommendations = state.recommendations().counts_by_status().await?;
    let treatments = state.treatments().counts_by_status().await?;
    let recent = state
        .treatments()
        .recent_submissions(RECENT_SUBMISSIONS)
        .await?;

    Ok(Json(DashboardResponse {
        recommendations_by_status: recommendations
            .into_iter()
            .map(StatusCountResponse::from)
            .collect(),
        treatments_by_status: treatments
            .into_iter()
            .map(StatusCountResponse::from)
            .collect(),
        recent_submissions: recent.into_iter().map(Into::into).collect(),
    }))
}
