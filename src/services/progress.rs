// src/services/progress.rs

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::{
        assessment_record::NewAssessmentRow,
        progress::{ProgressUpdate, StudentProgress, TopicProgress},
        quiz_record::NewQuizResult,
    },
    repository::{ProgressRepository, SqliteProgressRepository},
    scoring::{
        AssessmentResponse, AssessmentResult, DASS_Y_ID, QuizResult, SeverityReport, Topic,
        score_assessment,
    },
};

pub const QUIZ_SAVE_ERROR: &str = "Failed to save quiz results. Please try again.";
pub const ASSESSMENT_SAVE_ERROR: &str = "Failed to save assessment results. Please try again.";

/// Whether the persistence side of a submission went through.
/// A failed save never hides the computed result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveStatus {
    pub saved: bool,
    pub save_error: Option<&'static str>,
}

impl SaveStatus {
    fn from_failures(failed: bool, message: &'static str) -> Self {
        if failed {
            Self {
                saved: false,
                save_error: Some(message),
            }
        } else {
            Self {
                saved: true,
                save_error: None,
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizSubmission {
    pub topic: Topic,
    #[serde(flatten)]
    pub result: QuizResult,
    #[serde(flatten)]
    pub save: SaveStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentSubmission {
    pub result: AssessmentResult,
    pub severities: SeverityReport,
    #[serde(flatten)]
    pub save: SaveStatus,
}

/// Owns every write to a student's progress. Injected through `AppState`.
#[derive(Clone)]
pub struct ProgressStore {
    repo: Arc<dyn ProgressRepository>,
}

impl ProgressStore {
    pub fn new(repo: Arc<dyn ProgressRepository>) -> Self {
        Self { repo }
    }

    pub fn sqlite(pool: SqlitePool) -> Self {
        Self::new(Arc::new(SqliteProgressRepository::new(pool)))
    }

    /// Stored progress, or an empty record when the student has none yet.
    pub async fn progress(&self, student_id: i64) -> Result<StudentProgress, AppError> {
        Ok(self
            .repo
            .fetch_progress(student_id)
            .await?
            .unwrap_or_else(|| StudentProgress::empty(student_id)))
    }

    /// Fetch, shallow-merge and upsert. Entries not named in `update` are preserved.
    pub async fn update_progress(
        &self,
        student_id: i64,
        update: ProgressUpdate,
    ) -> Result<StudentProgress, AppError> {
        let progress = self.progress(student_id).await?;
        self.save_merged(progress, update).await
    }

    /// Merges into a record already read for this write and upserts it once.
    async fn save_merged(
        &self,
        mut progress: StudentProgress,
        update: ProgressUpdate,
    ) -> Result<StudentProgress, AppError> {
        progress.apply(update);
        self.repo.upsert_progress(&progress).await
    }

    /// Marks the interactive activities of a topic as done, keeping any quiz score.
    pub async fn complete_topic_activities(
        &self,
        student_id: i64,
        topic: Topic,
    ) -> Result<StudentProgress, AppError> {
        let progress = self.progress(student_id).await?;
        let entry = TopicProgress {
            completed: true,
            ..progress.topic(topic)
        };
        tracing::info!(student_id = student_id, topic = %topic, "topic activities completed");
        self.save_merged(progress, ProgressUpdate::topic(topic.as_str(), entry))
            .await
    }

    /// Scores a quiz attempt, then records it. The score is returned even if saving fails.
    ///
    /// Only `quizScore` is written. The topic's `completed` flag belongs to the activities
    /// and is left untouched.
    pub async fn submit_quiz(
        &self,
        student_id: i64,
        topic: Topic,
        selections: Vec<Option<usize>>,
    ) -> QuizSubmission {
        let result = topic.quiz().score(&selections);

        let mut failed = false;

        if let Err(e) = self
            .record_quiz_score(student_id, topic, result.percentage)
            .await
        {
            tracing::warn!(student_id = student_id, topic = %topic, "quiz progress not saved: {}", e);
            failed = true;
        }

        let record = NewQuizResult {
            student_id,
            topic,
            result,
            selected_answers: selections,
        };
        if let Err(e) = self.repo.insert_quiz_result(&record).await {
            tracing::warn!(student_id = student_id, topic = %topic, "quiz result row not saved: {}", e);
            failed = true;
        }

        tracing::info!(
            student_id = student_id,
            topic = %topic,
            percentage = result.percentage,
            saved = !failed,
            "quiz submitted"
        );

        QuizSubmission {
            topic,
            result,
            save: SaveStatus::from_failures(failed, QUIZ_SAVE_ERROR),
        }
    }

    /// Writes the latest quiz percentage, leaving the topic's activity flag as it was.
    async fn record_quiz_score(
        &self,
        student_id: i64,
        topic: Topic,
        percentage: u32,
    ) -> Result<StudentProgress, AppError> {
        let progress = self.progress(student_id).await?;
        let entry = TopicProgress {
            quiz_score: Some(percentage),
            ..progress.topic(topic)
        };
        self.save_merged(progress, ProgressUpdate::topic(topic.as_str(), entry))
            .await
    }

    /// Scores a DASS-Y response, merges it under `dass-y` and appends the report row.
    pub async fn submit_assessment(
        &self,
        student_id: i64,
        responses: AssessmentResponse,
        now: DateTime<Utc>,
    ) -> AssessmentSubmission {
        let result = score_assessment(responses, now);
        let severities = result.severities();

        let mut failed = false;

        if let Err(e) = self
            .update_progress(
                student_id,
                ProgressUpdate::assessment(DASS_Y_ID, result.clone()),
            )
            .await
        {
            tracing::warn!(student_id = student_id, "assessment progress not saved: {}", e);
            failed = true;
        }

        let row = NewAssessmentRow::from_result(student_id, &result);
        if let Err(e) = self.repo.insert_assessment_row(&row).await {
            tracing::warn!(student_id = student_id, "assessment report row not saved: {}", e);
            failed = true;
        }

        tracing::info!(
            student_id = student_id,
            total = result.total_score(),
            saved = !failed,
            "assessment submitted"
        );

        AssessmentSubmission {
            result,
            severities,
            save: SaveStatus::from_failures(failed, ASSESSMENT_SAVE_ERROR),
        }
    }
}
