// src/handlers/dashboard.rs

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::{
        assessment_record::AssessmentReportRow,
        dashboard::StudentListParams,
        progress::ProgressResponse,
        quiz_record::QuizResultRow,
        student::StudentSummary,
    },
    services::{ProgressStore, reporting},
};

async fn fetch_students(pool: &SqlitePool) -> Result<Vec<StudentSummary>, AppError> {
    sqlx::query_as::<_, StudentSummary>(
        "SELECT id, full_name, class FROM student ORDER BY class, full_name",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch students: {:?}", e);
        AppError::from(e)
    })
}

async fn fetch_quiz_results(pool: &SqlitePool) -> Result<Vec<QuizResultRow>, AppError> {
    sqlx::query_as::<_, QuizResultRow>(
        r#"
        SELECT id, student_id, topic_id, score_percentage, correct_answers,
               total_questions, selected_answers, created_at
        FROM quiz_results
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch quiz results: {:?}", e);
        AppError::from(e)
    })
}

async fn fetch_latest_assessments(
    pool: &SqlitePool,
) -> Result<HashMap<i64, AssessmentReportRow>, AppError> {
    let rows = sqlx::query_as::<_, AssessmentReportRow>(
        r#"
        SELECT id, student_id,
               depression_score, depression_level,
               anxiety_score, anxiety_level,
               stress_score, stress_level,
               total_score, total_level,
               created_at
        FROM assessment_result
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch assessment results: {:?}", e);
        AppError::from(e)
    })?;

    Ok(reporting::latest_assessments(rows))
}

/// Overview statistics for the counselor dashboard.
pub async fn overview(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let students = fetch_students(&pool).await?;
    let quiz_results = fetch_quiz_results(&pool).await?;
    let latest = fetch_latest_assessments(&pool).await?;

    Ok(Json(reporting::statistics(&students, &quiz_results, &latest)))
}

/// Student table: quiz attempts and latest assessment per student.
/// Filters by `class` and a case-insensitive `search` on the full name.
pub async fn list_students(
    State(pool): State<SqlitePool>,
    Query(params): Query<StudentListParams>,
) -> Result<impl IntoResponse, AppError> {
    let students = fetch_students(&pool).await?;
    let quiz_results = fetch_quiz_results(&pool).await?;
    let latest = fetch_latest_assessments(&pool).await?;

    let filtered = reporting::filter_students(&students, &params);

    Ok(Json(reporting::student_overviews(
        filtered,
        &quiz_results,
        &latest,
    )))
}

/// Merged progress document of one student.
pub async fn student_progress(
    State(pool): State<SqlitePool>,
    State(store): State<ProgressStore>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let _exists: i64 = sqlx::query_scalar("SELECT id FROM student WHERE id = ?")
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Student not found".to_string()))?;

    let progress = store.progress(id).await?;

    Ok(Json(ProgressResponse::from(progress)))
}
