// src/scoring/assessment.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    dass::{AssessmentResponse, ScaleScores, aggregate},
    severity::{Scale, Severity, classify},
};

/// A scored DASS-Y submission as kept in a student's progress document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub completed: bool,
    pub responses: AssessmentResponse,
    pub date: DateTime<Utc>,
    pub scores: ScaleScores,
}

/// Score and label for one scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScaleOutcome {
    pub score: u32,
    pub severity: Severity,
    pub label: &'static str,
}

impl ScaleOutcome {
    fn new(score: u32, scale: Scale) -> Self {
        let severity = classify(score, scale);
        Self {
            score,
            severity,
            label: severity.label(),
        }
    }
}

/// Severities derived from a result at presentation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeverityReport {
    pub depression: ScaleOutcome,
    pub anxiety: ScaleOutcome,
    pub stress: ScaleOutcome,
    pub total: ScaleOutcome,
}

impl SeverityReport {
    pub fn from_scores(scores: &ScaleScores) -> Self {
        Self {
            depression: ScaleOutcome::new(scores.depression, Scale::Depression),
            anxiety: ScaleOutcome::new(scores.anxiety, Scale::Anxiety),
            stress: ScaleOutcome::new(scores.stress, Scale::Stress),
            total: ScaleOutcome::new(scores.total(), Scale::Total),
        }
    }

    pub fn get(&self, scale: Scale) -> ScaleOutcome {
        match scale {
            Scale::Depression => self.depression,
            Scale::Anxiety => self.anxiety,
            Scale::Stress => self.stress,
            Scale::Total => self.total,
        }
    }
}

impl AssessmentResult {
    pub fn total_score(&self) -> u32 {
        self.scores.total()
    }

    pub fn severities(&self) -> SeverityReport {
        SeverityReport::from_scores(&self.scores)
    }
}

/// Scores a finished response. Never fails: unanswered items were already
/// normalised to 0 by the aggregator.
pub fn score_assessment(responses: AssessmentResponse, date: DateTime<Utc>) -> AssessmentResult {
    let aggregation = aggregate(&responses);

    AssessmentResult {
        completed: true,
        responses,
        date,
        scores: aggregation.scores,
    }
}
