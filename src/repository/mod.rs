// src/repository/mod.rs

//! Persistence boundary for progress and result records.

pub mod sqlite;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        assessment_record::NewAssessmentRow, progress::StudentProgress,
        quiz_record::NewQuizResult,
    },
};

pub use sqlite::SqliteProgressRepository;

/// Row-oriented storage used by [`crate::services::progress::ProgressStore`].
///
/// `upsert_progress` keeps at most one row per student; concurrent writers
/// overwrite each other and the last write wins.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    async fn fetch_progress(&self, student_id: i64) -> Result<Option<StudentProgress>, AppError>;

    async fn upsert_progress(&self, progress: &StudentProgress) -> Result<StudentProgress, AppError>;

    /// Appends one quiz attempt and returns its row id.
    async fn insert_quiz_result(&self, record: &NewQuizResult) -> Result<i64, AppError>;

    /// Appends one flat assessment row and returns its row id.
    async fn insert_assessment_row(&self, row: &NewAssessmentRow) -> Result<i64, AppError>;
}
