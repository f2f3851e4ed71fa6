//! Programmatic treatment intake handler
//!
//! External systems (schedulers, referral platforms) post treatments here
//! with a static API key instead of a staff JWT. The body may be any of the
//! three supported shapes; `intake::parse` picks the parser.

use axum::{extract::State, http::StatusCode, Json};

use crate::error::ApiError;
use crate::handlers::treatments::{self, RecordedTreatmentResponse};
use crate::intake;
use crate::AppState;

/// Accepts a treatment in FHIR-like, HL7-style, or flat JSON shape
pub async fn create_treatment(
    State(state): State<AppState>,
    body: String,
) -> Result<(StatusCode, Json<RecordedTreatmentResponse>), ApiError> {
    let order = intake::parse(&body)?;

    // Attach the patient's existing record for that tooth, when one exists
    let tooth = match order.tooth_number {
        Some(tooth_number) => state
            .teeth()
            .find_by_patient(order.patient_id)
            .await?
            .into_iter()
            .find(|record| record.tooth_number == tooth_number),
        None => None,
    };

    treatments::record(
        state,
        order.patient_id,
        order.code,
        order.quadrant,
        tooth,
        None,
    )
    .await
}
