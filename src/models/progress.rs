// src/models/progress.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::scoring::{AssessmentResult, DASS_Y_ID, Topic};

/// Progress on one learning topic.
///
/// `completed` tracks the interactive activities, `quiz_score` the latest quiz attempt.
/// The two are independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TopicProgress {
    pub completed: bool,
    /// Percentage of the latest attempt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 100))]
    pub quiz_score: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TopicStatus {
    NotStarted,
    LearningDone,
    QuizDone,
    FullyComplete,
}

impl TopicProgress {
    pub fn quiz_completed(&self) -> bool {
        self.quiz_score.is_some()
    }

    pub fn is_fully_complete(&self) -> bool {
        self.completed && self.quiz_completed()
    }

    pub fn status(&self) -> TopicStatus {
        match (self.completed, self.quiz_completed()) {
            (true, true) => TopicStatus::FullyComplete,
            (true, false) => TopicStatus::LearningDone,
            (false, true) => TopicStatus::QuizDone,
            (false, false) => TopicStatus::NotStarted,
        }
    }
}

pub type TopicProgressMap = BTreeMap<String, TopicProgress>;
pub type AssessmentResultMap = BTreeMap<String, AssessmentResult>;

/// Aggregate root: everything recorded for one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProgress {
    pub student_id: i64,
    #[serde(default)]
    pub topic_progress: TopicProgressMap,
    #[serde(default)]
    pub assessment_results: AssessmentResultMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial write. `None` leaves that part of the record alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    #[serde(default)]
    pub topic_progress: Option<TopicProgressMap>,
    #[serde(default)]
    pub assessment_results: Option<AssessmentResultMap>,
}

impl ProgressUpdate {
    pub fn topic(topic_id: impl Into<String>, progress: TopicProgress) -> Self {
        Self {
            topic_progress: Some(BTreeMap::from([(topic_id.into(), progress)])),
            assessment_results: None,
        }
    }

    pub fn assessment(assessment_id: impl Into<String>, result: AssessmentResult) -> Self {
        Self {
            topic_progress: None,
            assessment_results: Some(BTreeMap::from([(assessment_id.into(), result)])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.topic_progress.as_ref().is_none_or(|m| m.is_empty())
            && self.assessment_results.as_ref().is_none_or(|m| m.is_empty())
    }
}

/// Adds new topic entries and replaces existing ones wholesale. Other topics are kept.
pub fn merge_topic_progress(existing: &mut TopicProgressMap, incoming: TopicProgressMap) {
    existing.extend(incoming);
}

/// Same shallow merge for assessment results, keyed by assessment id.
pub fn merge_assessment_results(existing: &mut AssessmentResultMap, incoming: AssessmentResultMap) {
    existing.extend(incoming);
}

impl StudentProgress {
    /// "No progress yet" for a student without a stored row.
    pub fn empty(student_id: i64) -> Self {
        Self {
            student_id,
            topic_progress: TopicProgressMap::new(),
            assessment_results: AssessmentResultMap::new(),
            updated_at: None,
        }
    }

    pub fn apply(&mut self, update: ProgressUpdate) {
        if let Some(topics) = update.topic_progress {
            merge_topic_progress(&mut self.topic_progress, topics);
        }
        if let Some(results) = update.assessment_results {
            merge_assessment_results(&mut self.assessment_results, results);
        }
    }

    pub fn topic(&self, topic: Topic) -> TopicProgress {
        self.topic_progress
            .get(topic.as_str())
            .copied()
            .unwrap_or_default()
    }

    pub fn assessment_completed(&self) -> bool {
        self.assessment_results
            .get(DASS_Y_ID)
            .is_some_and(|result| result.completed)
    }

    pub fn summary(&self) -> ProgressSummary {
        let topics: Vec<TopicSummary> = Topic::ALL
            .into_iter()
            .map(|topic| {
                let progress = self.topic(topic);
                TopicSummary {
                    topic,
                    title: topic.title(),
                    status: progress.status(),
                    quiz_score: progress.quiz_score,
                }
            })
            .collect();

        let total_topics = topics.len() as u32;
        let completed_topics = Topic::ALL
            .into_iter()
            .filter(|t| self.topic(*t).completed)
            .count() as u32;
        let completed_quizzes = Topic::ALL
            .into_iter()
            .filter(|t| self.topic(*t).quiz_completed())
            .count() as u32;

        ProgressSummary {
            completed_topics,
            completed_quizzes,
            total_topics,
            overall_percentage: crate::scoring::quiz::percentage(
                completed_topics + completed_quizzes,
                total_topics * 2,
            ),
            assessment_completed: self.assessment_completed(),
            topics,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    pub topic: Topic,
    pub title: &'static str,
    pub status: TopicStatus,
    pub quiz_score: Option<u32>,
}

/// Progress tracker view for the student dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub completed_topics: u32,
    pub completed_quizzes: u32,
    pub total_topics: u32,
    pub overall_percentage: u32,
    pub assessment_completed: bool,
    pub topics: Vec<TopicSummary>,
}

/// Response for `GET /api/progress/me`.
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub progress: StudentProgress,
    pub summary: ProgressSummary,
}

impl From<StudentProgress> for ProgressResponse {
    fn from(progress: StudentProgress) -> Self {
        let summary = progress.summary();
        Self { progress, summary }
    }
}
