// src/models/quiz_record.rs

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};

use crate::scoring::{QuizResult, Topic};

/// Represents the append-only 'quiz_results' table.
/// Every attempt is a new row; retakes never overwrite earlier ones.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizResultRow {
    pub id: i64,
    pub student_id: i64,
    pub topic_id: String,
    pub score_percentage: i64,
    pub correct_answers: i64,
    pub total_questions: i64,
    pub selected_answers: Json<Vec<Option<usize>>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Row to append after a quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuizResult {
    pub student_id: i64,
    pub topic: Topic,
    pub result: QuizResult,
    pub selected_answers: Vec<Option<usize>>,
}

/// DTO for submitting a quiz attempt.
#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    /// Selected option index per question, in question order.
    /// `null` marks a question left unanswered.
    pub selections: Vec<Option<usize>>,
}

/// Public view of a quiz question, without the answer key.
#[derive(Debug, Serialize)]
pub struct PublicQuizQuestion {
    pub id: u8,
    pub text: &'static str,
    pub options: [&'static str; 2],
}

#[derive(Debug, Serialize)]
pub struct PublicQuiz {
    pub topic: Topic,
    pub title: &'static str,
    pub questions: Vec<PublicQuizQuestion>,
}

impl From<&crate::scoring::Quiz> for PublicQuiz {
    fn from(quiz: &crate::scoring::Quiz) -> Self {
        Self {
            topic: quiz.topic,
            title: quiz.title,
            questions: quiz
                .questions
                .iter()
                .map(|q| PublicQuizQuestion {
                    id: q.id,
                    text: q.text,
                    options: q.options,
                })
                .collect(),
        }
    }
}
