// src/scoring/mod.rs

//! Pure scoring core: severity bands, DASS-Y aggregation and quiz scoring.

pub mod assessment;
pub mod dass;
pub mod quiz;
pub mod severity;

pub use assessment::{AssessmentResult, SeverityReport, score_assessment};
pub use dass::{AssessmentResponse, DASS_Y_ID, ScaleScores};
pub use quiz::{Quiz, QuizResult, Topic};
pub use severity::{Scale, Severity, classify};
