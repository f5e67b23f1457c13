// tests/api_tests.rs

mod common;

use common::{COUNSELOR_USERNAME, PASSWORD, correct_selections, spawn_app};
use wellbeing::scoring::{Topic, dass::SCALE_MAPPING};

#[tokio::test]
async fn health_check_404() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/random_path_that_does_not_exist"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn signup_fails_validation() {
    let app = spawn_app().await;

    // Username too short
    let response = app
        .client
        .post(app.url("/api/auth/signup"))
        .json(&serde_json::json!({
            "username": "yo",
            "password": PASSWORD,
            "full_name": "Yo",
            "class": "5A"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn duplicate_username_conflicts() {
    let app = spawn_app().await;
    let body = serde_json::json!({
        "username": "same_name",
        "password": PASSWORD,
        "full_name": "Sam",
        "class": "5A"
    });

    let first = app
        .client
        .post(app.url("/api/auth/signup"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(first.status().as_u16(), 201);
    let created: serde_json::Value = first.json().await.unwrap();
    assert!(created.get("password").is_none());

    let second = app
        .client
        .post(app.url("/api/auth/signup"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(second.status().as_u16(), 409);
}

#[tokio::test]
async fn counselor_username_is_not_available_to_students() {
    let app = spawn_app().await;

    let resp = app
        .client
        .post(app.url("/api/auth/signup"))
        .json(&serde_json::json!({
            "username": COUNSELOR_USERNAME,
            "password": PASSWORD,
            "full_name": "Impostor",
            "class": "5A"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 409);

    let students: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM student")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(students, 0);

    // The counselor account still logs in as before
    let token = app.counselor_token().await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn login_failures_share_one_message() {
    let app = spawn_app().await;
    let (username, _) = app.student("Mia", "5A").await;

    let mut messages = Vec::new();
    for (user, pass) in [(username.as_str(), "wrong-password"), ("nobody_here", PASSWORD)] {
        let resp = app
            .client
            .post(app.url("/api/auth/login"))
            .json(&serde_json::json!({ "username": user, "password": pass }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 401);
        let body: serde_json::Value = resp.json().await.unwrap();
        messages.push(body["error"].as_str().unwrap().to_string());
    }

    assert_eq!(messages[0], messages[1]);
}

#[tokio::test]
async fn quiz_is_served_without_answer_key() {
    let app = spawn_app().await;

    let quiz: serde_json::Value = app
        .client
        .get(app.url("/api/quiz/emotions"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let questions = quiz["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 5);
    assert!(questions.iter().all(|q| q.get("correctAnswer").is_none()));

    let missing = app
        .client
        .get(app.url("/api/quiz/friendship"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);
}

#[tokio::test]
async fn submit_requires_token() {
    let app = spawn_app().await;

    let resp = app
        .client
        .post(app.url("/api/quiz/emotions/submit"))
        .json(&serde_json::json!({ "selections": [0, 1, 0, 1, 0] }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 401);
}

#[tokio::test]
async fn quiz_flow_updates_progress() {
    let app = spawn_app().await;
    let (_, token) = app.student("Leo", "5B").await;

    // Activities first, then a 60% quiz
    let resp = app
        .client
        .post(app.url("/api/progress/topics/emotions/complete"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let mut selections = correct_selections(Topic::Emotions);
    selections[0] = None;
    selections[1] = Some(1 - selections[1].unwrap());

    let result: serde_json::Value = app
        .client
        .post(app.url("/api/quiz/emotions/submit"))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "selections": selections }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(result["correctCount"], 3);
    assert_eq!(result["totalQuestions"], 5);
    assert_eq!(result["percentage"], 60);
    assert_eq!(result["saved"], true);
    assert!(result["saveError"].is_null());

    let progress: serde_json::Value = app
        .client
        .get(app.url("/api/progress/me"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let emotions = &progress["progress"]["topicProgress"]["emotions"];
    assert_eq!(emotions["completed"], true);
    assert_eq!(emotions["quizScore"], 60);
    assert_eq!(progress["summary"]["completedTopics"], 1);
    assert_eq!(progress["summary"]["completedQuizzes"], 1);
    assert_eq!(progress["summary"]["overallPercentage"], 33);
    assert_eq!(progress["summary"]["topics"][0]["status"], "fullyComplete");
}

#[tokio::test]
async fn assessment_flow_scores_and_preserves_topics() {
    let app = spawn_app().await;
    let (_, token) = app.student("Ava", "5A").await;

    let update = app
        .client
        .put(app.url("/api/progress/me"))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "topicProgress": { "stress": { "completed": true, "quizScore": 85 } }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(update.status().as_u16(), 200);

    // depression 5, anxiety 4, stress 6
    let mut responses = vec![0i16; 21];
    for id in &SCALE_MAPPING.depression[..5] {
        responses[usize::from(*id) - 1] = 1;
    }
    for id in &SCALE_MAPPING.anxiety[..2] {
        responses[usize::from(*id) - 1] = 2;
    }
    for id in &SCALE_MAPPING.stress[..2] {
        responses[usize::from(*id) - 1] = 3;
    }

    let result: serde_json::Value = app
        .client
        .post(app.url("/api/assessment/submit"))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "responses": responses }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(result["saved"], true);
    assert_eq!(result["result"]["scores"]["depression"], 5);
    assert_eq!(result["severities"]["depression"]["severity"], "normal");
    assert_eq!(result["severities"]["anxiety"]["score"], 4);
    assert_eq!(result["severities"]["stress"]["score"], 6);
    assert_eq!(result["severities"]["total"]["score"], 15);
    assert_eq!(result["severities"]["total"]["label"], "Normal");

    let progress: serde_json::Value = app
        .client
        .get(app.url("/api/progress/me"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(progress["progress"]["topicProgress"]["stress"]["quizScore"], 85);
    assert_eq!(progress["progress"]["assessmentResults"]["dass-y"]["completed"], true);
    assert_eq!(progress["summary"]["assessmentCompleted"], true);
}

#[tokio::test]
async fn progress_update_rejects_forged_results() {
    let app = spawn_app().await;
    let (_, token) = app.student("Zoe", "5B").await;

    let out_of_range = app
        .client
        .put(app.url("/api/progress/me"))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "topicProgress": { "emotions": { "completed": false, "quizScore": 500 } }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(out_of_range.status().as_u16(), 400);

    let forged_assessment = app
        .client
        .put(app.url("/api/progress/me"))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "assessmentResults": {
                "dass-y": {
                    "completed": true,
                    "responses": [],
                    "date": "2026-01-01T00:00:00Z",
                    "scores": { "depression": 999, "anxiety": 0, "stress": 0 }
                }
            }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(forged_assessment.status().as_u16(), 400);

    let progress: serde_json::Value = app
        .client
        .get(app.url("/api/progress/me"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(progress["progress"]["topicProgress"]["emotions"].is_null());
    assert!(progress["progress"]["assessmentResults"]["dass-y"].is_null());
    assert_eq!(progress["summary"]["assessmentCompleted"], false);
}

#[tokio::test]
async fn incomplete_assessment_is_rejected() {
    let app = spawn_app().await;
    let (_, token) = app.student("Ben", "5A").await;

    let mut responses = vec![1i16; 21];
    responses[20] = -1;

    let resp = app
        .client
        .post(app.url("/api/assessment/submit"))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "responses": responses }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assessment_result")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(rows, 0);
}

#[tokio::test]
async fn assessment_statements_are_public() {
    let app = spawn_app().await;

    let body: serde_json::Value = app
        .client
        .get(app.url("/api/assessment"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["id"], "dass-y");
    assert_eq!(body["items"].as_array().unwrap().len(), 21);
    assert_eq!(body["options"][3]["label"], "Very True");
}
