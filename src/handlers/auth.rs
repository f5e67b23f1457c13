// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::student::{Counselor, CreateStudentRequest, LoginRequest, Student},
    utils::{
        hash::{hash_password, verify_against_dummy, verify_password},
        jwt::{Role, sign_jwt},
    },
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Registers a new student.
///
/// Hashes the password using Argon2 before storing it.
/// Returns 201 Created and the student (excluding password).
pub async fn signup(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    // Login checks counselors first, so their usernames are taken for students too.
    let counselor_id: Option<i64> = sqlx::query_scalar("SELECT id FROM admin WHERE username = ?")
        .bind(payload.username.trim())
        .fetch_optional(&pool)
        .await?;
    if counselor_id.is_some() {
        return Err(AppError::Conflict(format!(
            "Username '{}' already exists",
            payload.username
        )));
    }

    let hashed_password = hash_password(&payload.password)?;

    let student = sqlx::query_as::<_, Student>(
        r#"
        INSERT INTO student (username, password, full_name, gender, class, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id, username, password, full_name, gender, class, created_at
        "#,
    )
    .bind(payload.username.trim())
    .bind(&hashed_password)
    .bind(payload.full_name.trim())
    .bind(payload.normalized_gender())
    .bind(payload.class.trim())
    .bind(Utc::now())
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict(format!("Username '{}' already exists", payload.username))
        } else {
            tracing::error!("Failed to register student: {:?}", e);
            AppError::from(e)
        }
    })?;

    tracing::info!(student_id = student.id, "student registered");

    Ok((StatusCode::CREATED, Json(student)))
}

/// Authenticates a counselor or a student and returns a JWT token.
///
/// Counselor accounts are checked first. Unknown usernames and wrong passwords
/// produce the same response.
pub async fn login(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.validate().is_err() {
        return Err(AppError::AuthError(INVALID_CREDENTIALS.to_string()));
    }

    let counselor = sqlx::query_as::<_, Counselor>(
        "SELECT id, username, password, full_name FROM admin WHERE username = ?",
    )
    .bind(&payload.username)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Login DB error: {:?}", e);
        AppError::from(e)
    })?;

    if let Some(counselor) = counselor {
        if !verify_password(&payload.password, &counselor.password)? {
            return Err(AppError::AuthError(INVALID_CREDENTIALS.to_string()));
        }
        let token = sign_jwt(
            counselor.id,
            Role::Counselor,
            &config.jwt_secret,
            config.jwt_expiration,
        )?;
        return Ok(Json(json!({
            "token": token,
            "type": "Bearer",
            "role": Role::Counselor,
            "name": counselor.full_name,
        })));
    }

    let student = sqlx::query_as::<_, Student>(
        r#"
        SELECT id, username, password, full_name, gender, class, created_at
        FROM student
        WHERE username = ?
        "#,
    )
    .bind(&payload.username)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Login DB error: {:?}", e);
        AppError::from(e)
    })?;

    let Some(student) = student else {
        verify_against_dummy(&payload.password)?;
        return Err(AppError::AuthError(INVALID_CREDENTIALS.to_string()));
    };

    if !verify_password(&payload.password, &student.password)? {
        return Err(AppError::AuthError(INVALID_CREDENTIALS.to_string()));
    }

    let token = sign_jwt(
        student.id,
        Role::Student,
        &config.jwt_secret,
        config.jwt_expiration,
    )?;

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
        "role": Role::Student,
        "name": student.full_name,
        "class": student.class,
    })))
}

/// Creates the counselor account from configuration if it does not exist yet.
pub async fn seed_counselor(pool: &SqlitePool, config: &Config) -> Result<(), AppError> {
    let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) else {
        return Ok(());
    };

    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM admin WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    if exists.is_none() {
        tracing::info!("Seeding counselor account: {}", username);
        let hashed_password = hash_password(password)?;

        sqlx::query(
            "INSERT INTO admin (username, password, full_name, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(username)
        .bind(hashed_password)
        .bind("School Counselor")
        .bind(Utc::now())
        .execute(pool)
        .await?;
        tracing::info!("Counselor account created successfully.");
    }
    Ok(())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
