// src/models/student.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'student' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,

    /// Unique username.
    pub username: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    pub full_name: String,

    pub gender: Option<String>,

    /// School class, e.g. "5A". Used by the counselor dashboard filter.
    pub class: String,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Represents the 'admin' table (counselor accounts).
#[derive(Debug, Clone, FromRow)]
pub struct Counselor {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub full_name: String,
}

/// Student row without credentials, as listed on the dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentSummary {
    pub id: i64,
    pub full_name: String,
    pub class: String,
}

/// DTO for student sign-up.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username length must be between 3 and 50 characters."
    ))]
    pub username: String,
    #[validate(length(
        min = 4,
        max = 128,
        message = "Password length must be between 4 and 128 characters."
    ))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
    #[validate(length(max = 20))]
    pub gender: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub class: String,
}

impl CreateStudentRequest {
    /// "fEMALE" -> "Female". Blank values become `None`.
    pub fn normalized_gender(&self) -> Option<String> {
        let gender = self.gender.as_deref()?.trim();
        let mut chars = gender.chars();
        let first = chars.next()?;
        Some(first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect())
    }
}

/// DTO for login. Used by students and counselors alike.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}
