// src/handlers/mod.rs

pub mod assessment;
pub mod auth;
pub mod dashboard;
pub mod progress;
pub mod quiz;
