// src/handlers/assessment.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use chrono::Utc;
use serde_json::json;

use crate::{
    error::AppError,
    models::assessment_record::SubmitAssessmentRequest,
    scoring::{
        AssessmentResponse,
        dass::{DASS_Y_ID, ITEMS, RESPONSE_OPTIONS},
    },
    services::ProgressStore,
    utils::jwt::Claims,
};

/// Returns the DASS-Y statements and answer scale.
pub async fn get_assessment() -> impl IntoResponse {
    Json(json!({
        "id": DASS_Y_ID,
        "title": "Mental Health Assessment",
        "items": ITEMS,
        "options": RESPONSE_OPTIONS,
    }))
}

/// Scores a DASS-Y submission for the calling student.
///
/// Every item must be answered. The result is merged into the student's progress
/// under `dass-y` and a flat report row is appended for counselors.
pub async fn submit_assessment(
    State(store): State<ProgressStore>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SubmitAssessmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let student_id = claims.student_id()?;

    let responses = AssessmentResponse::from_values(req.responses)?;
    responses.ensure_complete()?;

    let submission = store
        .submit_assessment(student_id, responses, Utc::now())
        .await;

    Ok(Json(submission))
}
