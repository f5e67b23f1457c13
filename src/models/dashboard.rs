// src/models/dashboard.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{
    assessment_record::AssessmentReportRow, quiz_record::QuizResultRow, student::StudentSummary,
};

/// Query parameters for the counselor's student list.
#[derive(Debug, Default, Deserialize)]
pub struct StudentListParams {
    /// Exact class name; `all` or absent means every class.
    pub class: Option<String>,
    /// Case-insensitive substring of the student's full name.
    pub search: Option<String>,
}

/// One row on the counselor's student table.
#[derive(Debug, Clone, Serialize)]
pub struct StudentOverview {
    #[serde(flatten)]
    pub student: StudentSummary,
    pub quiz_results: Vec<QuizResultRow>,
    pub latest_assessment: Option<AssessmentReportRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStatistics {
    pub total_students: usize,
    pub safe_students: usize,
    pub at_risk_students: usize,
    pub average_quiz_score: u32,
    pub topic_attempts: BTreeMap<String, usize>,
}
