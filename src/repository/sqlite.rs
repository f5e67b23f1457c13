// src/repository/sqlite.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool, types::Json};

use super::ProgressRepository;
use crate::{
    error::AppError,
    models::{
        assessment_record::NewAssessmentRow,
        progress::{AssessmentResultMap, StudentProgress, TopicProgressMap},
        quiz_record::NewQuizResult,
    },
};

/// Helper struct for reading the 'student_progress' table.
#[derive(FromRow)]
struct ProgressRow {
    student_id: i64,
    topic_progress: Json<TopicProgressMap>,
    assessment_results: Json<AssessmentResultMap>,
    updated_at: DateTime<Utc>,
}

impl From<ProgressRow> for StudentProgress {
    fn from(row: ProgressRow) -> Self {
        Self {
            student_id: row.student_id,
            topic_progress: row.topic_progress.0,
            assessment_results: row.assessment_results.0,
            updated_at: Some(row.updated_at),
        }
    }
}

#[derive(Clone)]
pub struct SqliteProgressRepository {
    pool: SqlitePool,
}

impl SqliteProgressRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressRepository for SqliteProgressRepository {
    async fn fetch_progress(&self, student_id: i64) -> Result<Option<StudentProgress>, AppError> {
        let row = sqlx::query_as::<_, ProgressRow>(
            r#"
            SELECT student_id, topic_progress, assessment_results, updated_at
            FROM student_progress
            WHERE student_id = ?
            "#,
        )
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch progress for student {}: {:?}", student_id, e);
            AppError::from(e)
        })?;

        Ok(row.map(StudentProgress::from))
    }

    async fn upsert_progress(&self, progress: &StudentProgress) -> Result<StudentProgress, AppError> {
        let updated_at = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO student_progress (student_id, topic_progress, assessment_results, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(student_id) DO UPDATE SET
                topic_progress = excluded.topic_progress,
                assessment_results = excluded.assessment_results,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(progress.student_id)
        .bind(Json(&progress.topic_progress))
        .bind(Json(&progress.assessment_results))
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to upsert progress for student {}: {:?}",
                progress.student_id,
                e
            );
            AppError::from(e)
        })?;

        Ok(StudentProgress {
            updated_at: Some(updated_at),
            ..progress.clone()
        })
    }

    async fn insert_quiz_result(&self, record: &NewQuizResult) -> Result<i64, AppError> {
        let id = sqlx::query(
            r#"
            INSERT INTO quiz_results
                (student_id, topic_id, score_percentage, correct_answers, total_questions, selected_answers, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.student_id)
        .bind(record.topic.as_str())
        .bind(i64::from(record.result.percentage))
        .bind(i64::from(record.result.correct_count))
        .bind(i64::from(record.result.total_questions))
        .bind(Json(&record.selected_answers))
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert quiz result: {:?}", e);
            AppError::from(e)
        })?
        .last_insert_rowid();

        Ok(id)
    }

    async fn insert_assessment_row(&self, row: &NewAssessmentRow) -> Result<i64, AppError> {
        let id = sqlx::query(
            r#"
            INSERT INTO assessment_result (
                student_id,
                depression_score, depression_level,
                anxiety_score, anxiety_level,
                stress_score, stress_level,
                total_score, total_level,
                created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(row.student_id)
        .bind(i64::from(row.depression.0))
        .bind(row.depression.1.as_key())
        .bind(i64::from(row.anxiety.0))
        .bind(row.anxiety.1.as_key())
        .bind(i64::from(row.stress.0))
        .bind(row.stress.1.as_key())
        .bind(i64::from(row.total.0))
        .bind(row.total.1.as_key())
        .bind(row.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert assessment row: {:?}", e);
            AppError::from(e)
        })?
        .last_insert_rowid();

        Ok(id)
    }
}
