// src/models/assessment_record.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::scoring::{AssessmentResult, Scale, Severity};

/// Represents the append-only 'assessment_result' table: one flat, denormalised row per
/// submission for counselor reporting.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssessmentReportRow {
    pub id: i64,
    pub student_id: i64,
    pub depression_score: i64,
    pub depression_level: String,
    pub anxiety_score: i64,
    pub anxiety_level: String,
    pub stress_score: i64,
    pub stress_level: String,
    pub total_score: i64,
    pub total_level: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl AssessmentReportRow {
    /// Stored level of a scale. Unreadable levels are treated as not safe.
    pub fn level(&self, scale: Scale) -> Option<Severity> {
        let raw = match scale {
            Scale::Depression => &self.depression_level,
            Scale::Anxiety => &self.anxiety_level,
            Scale::Stress => &self.stress_level,
            Scale::Total => &self.total_level,
        };
        raw.parse().ok()
    }

    /// Latest depression, anxiety and stress levels are all normal or mild.
    pub fn is_safe(&self) -> bool {
        Scale::SUBSCALES
            .into_iter()
            .all(|scale| self.level(scale).is_some_and(Severity::is_safe))
    }
}

/// Row to append after an assessment submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAssessmentRow {
    pub student_id: i64,
    pub depression: (u32, Severity),
    pub anxiety: (u32, Severity),
    pub stress: (u32, Severity),
    pub total: (u32, Severity),
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl NewAssessmentRow {
    pub fn from_result(student_id: i64, result: &AssessmentResult) -> Self {
        let report = result.severities();
        Self {
            student_id,
            depression: (report.depression.score, report.depression.severity),
            anxiety: (report.anxiety.score, report.anxiety.severity),
            stress: (report.stress.score, report.stress.severity),
            total: (report.total.score, report.total.severity),
            created_at: result.date,
        }
    }
}

/// DTO for submitting the DASS-Y questionnaire: 21 values, `-1` for unanswered.
#[derive(Debug, Deserialize)]
pub struct SubmitAssessmentRequest {
    pub responses: Vec<i16>,
}
