// tests/common/mod.rs

#![allow(dead_code)]

use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use wellbeing::{config::Config, handlers::auth::seed_counselor, routes, state::AppState};

pub const COUNSELOR_USERNAME: &str = "counselor";
pub const COUNSELOR_PASSWORD: &str = "counselor-pass";
pub const PASSWORD: &str = "password123";

pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
    pub client: reqwest::Client,
}

/// Spawns the app on a random port over a fresh in-memory database.
pub async fn spawn_app() -> TestApp {
    // A single, never-recycled connection keeps the in-memory database alive.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        port: 0,
        admin_username: Some(COUNSELOR_USERNAME.to_string()),
        admin_password: Some(COUNSELOR_PASSWORD.to_string()),
    };

    seed_counselor(&pool, &config)
        .await
        .expect("Failed to seed counselor");

    let app = routes::create_router(AppState::new(pool.clone(), config));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        pool,
        client: reqwest::Client::new(),
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Registers a student and returns `(username, token)`.
    pub async fn student(&self, full_name: &str, class: &str) -> (String, String) {
        let username = format!("s_{}", &uuid::Uuid::new_v4().to_string()[..8]);

        let resp = self
            .client
            .post(self.url("/api/auth/signup"))
            .json(&serde_json::json!({
                "username": username,
                "password": PASSWORD,
                "full_name": full_name,
                "class": class,
                "gender": "female"
            }))
            .send()
            .await
            .expect("Signup failed");
        assert_eq!(resp.status().as_u16(), 201);

        let token = self.login(&username, PASSWORD).await;
        (username, token)
    }

    pub async fn login(&self, username: &str, password: &str) -> String {
        let body: serde_json::Value = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Login failed")
            .json()
            .await
            .expect("Failed to parse login json");

        body["token"].as_str().expect("Token not found").to_string()
    }

    pub async fn counselor_token(&self) -> String {
        self.login(COUNSELOR_USERNAME, COUNSELOR_PASSWORD).await
    }
}

/// Selections answering every question of a topic correctly.
pub fn correct_selections(topic: wellbeing::scoring::Topic) -> Vec<Option<usize>> {
    topic
        .quiz()
        .questions
        .iter()
        .map(|q| Some(q.correct_answer))
        .collect()
}
