// src/services/mod.rs

pub mod progress;
pub mod reporting;

pub use progress::ProgressStore;
