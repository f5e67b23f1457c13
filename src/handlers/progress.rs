// src/handlers/progress.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::progress::{ProgressResponse, ProgressUpdate},
    scoring::Topic,
    services::ProgressStore,
    utils::jwt::Claims,
};

/// Current student's progress with the tracker summary.
pub async fn get_my_progress(
    State(store): State<ProgressStore>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let student_id = claims.student_id()?;
    let progress = store.progress(student_id).await?;

    Ok(Json(ProgressResponse::from(progress)))
}

/// Partial update of the current student's topic progress.
/// Topics not named in the body are left as they are.
///
/// Assessment results are only written by `POST /api/assessment/submit`, which scores
/// the responses and appends the counselor report row. They are rejected here.
pub async fn update_my_progress(
    State(store): State<ProgressStore>,
    Extension(claims): Extension<Claims>,
    Json(update): Json<ProgressUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let student_id = claims.student_id()?;

    if update.is_empty() {
        return Err(AppError::BadRequest("Nothing to update".to_string()));
    }
    if update.assessment_results.is_some() {
        return Err(AppError::BadRequest(
            "Assessment results are recorded through /api/assessment/submit".to_string(),
        ));
    }
    for (id, entry) in update.topic_progress.iter().flatten() {
        if id.parse::<Topic>().is_err() {
            return Err(AppError::BadRequest(format!("Unknown topic '{}'", id)));
        }
        entry
            .validate()
            .map_err(|e| AppError::BadRequest(format!("Topic '{}': {}", id, e)))?;
    }

    let progress = store.update_progress(student_id, update).await?;

    Ok(Json(ProgressResponse::from(progress)))
}

/// Marks a topic's interactive activities as finished.
pub async fn complete_topic(
    State(store): State<ProgressStore>,
    Extension(claims): Extension<Claims>,
    Path(topic): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let student_id = claims.student_id()?;
    let topic: Topic = topic.parse()?;

    let progress = store.complete_topic_activities(student_id, topic).await?;

    Ok(Json(ProgressResponse::from(progress)))
}
