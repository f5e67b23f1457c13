// src/models/mod.rs

pub mod assessment_record;
pub mod dashboard;
pub mod progress;
pub mod quiz_record;
pub mod student;
