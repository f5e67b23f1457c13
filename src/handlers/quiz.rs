// src/handlers/quiz.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Serialize;

use crate::{
    error::AppError,
    models::quiz_record::{PublicQuiz, SubmitQuizRequest},
    scoring::Topic,
    services::ProgressStore,
    utils::jwt::Claims,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TopicEntry {
    id: Topic,
    title: &'static str,
    question_count: usize,
}

/// Lists the learning topics.
pub async fn list_topics() -> impl IntoResponse {
    let topics: Vec<TopicEntry> = Topic::ALL
        .into_iter()
        .map(|topic| TopicEntry {
            id: topic,
            title: topic.title(),
            question_count: topic.quiz().len(),
        })
        .collect();

    Json(topics)
}

/// Returns a topic's quiz without the answer key.
pub async fn get_quiz(Path(topic): Path<String>) -> Result<impl IntoResponse, AppError> {
    let topic: Topic = topic.parse()?;
    Ok(Json(PublicQuiz::from(topic.quiz())))
}

/// Scores a quiz attempt for the calling student.
///
/// * Compares each selection with the answer key (missing selections are wrong).
/// * Stores the latest percentage in the student's topic progress.
/// * Appends the attempt to `quiz_results`; earlier attempts are kept.
///
/// A failed save still answers 200 with the score and `saved: false`.
pub async fn submit_quiz(
    State(store): State<ProgressStore>,
    Extension(claims): Extension<Claims>,
    Path(topic): Path<String>,
    Json(req): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let student_id = claims.student_id()?;
    let topic: Topic = topic.parse()?;

    if req.selections.len() > topic.quiz().len() {
        return Err(AppError::BadRequest(format!(
            "Quiz '{}' has {} questions, got {} selections",
            topic,
            topic.quiz().len(),
            req.selections.len()
        )));
    }

    let submission = store.submit_quiz(student_id, topic, req.selections).await;

    Ok(Json(submission))
}
