// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{assessment, auth, dashboard, progress, quiz},
    state::AppState,
    utils::jwt::{auth_middleware, counselor_middleware},
};

/// Assembles the main application router.
///
/// * Public: auth, topic list, quiz questions, assessment statements.
/// * Student (bearer token): submissions and own progress.
/// * Counselor (bearer token + role): dashboard.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:5173"),
            HeaderValue::from_static("http://127.0.0.1:5173"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let auth_layer = middleware::from_fn_with_state(state.clone(), auth_middleware);

    let auth_routes = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login));

    let quiz_routes = Router::new()
        .route("/{topic}", get(quiz::get_quiz))
        // Protected quiz routes
        .merge(
            Router::new()
                .route("/{topic}/submit", post(quiz::submit_quiz))
                .layer(auth_layer.clone()),
        );

    let assessment_routes = Router::new().route("/", get(assessment::get_assessment)).merge(
        Router::new()
            .route("/submit", post(assessment::submit_assessment))
            .layer(auth_layer.clone()),
    );

    let progress_routes = Router::new()
        .route(
            "/me",
            get(progress::get_my_progress).put(progress::update_my_progress),
        )
        .route("/topics/{topic}/complete", post(progress::complete_topic))
        .layer(auth_layer.clone());

    let dashboard_routes = Router::new()
        .route("/overview", get(dashboard::overview))
        .route("/students", get(dashboard::list_students))
        .route("/students/{id}/progress", get(dashboard::student_progress))
        // Auth first, then the counselor check
        .layer(
            ServiceBuilder::new()
                .layer(auth_layer)
                .layer(middleware::from_fn(counselor_middleware)),
        );

    Router::new()
        .nest("/api/auth", auth_routes)
        .route("/api/topics", get(quiz::list_topics))
        .nest("/api/quiz", quiz_routes)
        .nest("/api/assessment", assessment_routes)
        .nest("/api/progress", progress_routes)
        .nest("/api/dashboard", dashboard_routes)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
        .with_state(state)
}
