// tests/dashboard_tests.rs

mod common;

use common::{correct_selections, spawn_app};
use wellbeing::scoring::Topic;

#[tokio::test]
async fn dashboard_requires_counselor_role() {
    let app = spawn_app().await;
    let (_, student_token) = app.student("Mia", "5A").await;

    let anonymous = app
        .client
        .get(app.url("/api/dashboard/overview"))
        .send()
        .await
        .unwrap();
    assert_eq!(anonymous.status().as_u16(), 401);

    let as_student = app
        .client
        .get(app.url("/api/dashboard/overview"))
        .bearer_auth(&student_token)
        .send()
        .await
        .unwrap();
    assert_eq!(as_student.status().as_u16(), 403);

    // And counselors have no progress of their own
    let counselor = app.counselor_token().await;
    let own_progress = app
        .client
        .get(app.url("/api/progress/me"))
        .bearer_auth(&counselor)
        .send()
        .await
        .unwrap();
    assert_eq!(own_progress.status().as_u16(), 403);
}

#[tokio::test]
async fn dashboard_reports_students_quizzes_and_latest_assessment() {
    let app = spawn_app().await;
    let (_, ava) = app.student("Ava Lim", "5A").await;
    let (_, ben) = app.student("Ben Ong", "5B").await;
    let (_, _cai) = app.student("Cai Tan", "5A").await;

    // Ava: two quiz attempts (100 and 60), then a calm assessment
    app.client
        .post(app.url("/api/quiz/emotions/submit"))
        .bearer_auth(&ava)
        .json(&serde_json::json!({ "selections": correct_selections(Topic::Emotions) }))
        .send()
        .await
        .unwrap();
    let mut retake = correct_selections(Topic::Emotions);
    retake[0] = None;
    retake[1] = None;
    app.client
        .post(app.url("/api/quiz/emotions/submit"))
        .bearer_auth(&ava)
        .json(&serde_json::json!({ "selections": retake }))
        .send()
        .await
        .unwrap();
    app.client
        .post(app.url("/api/assessment/submit"))
        .bearer_auth(&ava)
        .json(&serde_json::json!({ "responses": vec![0; 21] }))
        .send()
        .await
        .unwrap();

    // Ben: a worrying assessment, then a calmer one that supersedes it
    app.client
        .post(app.url("/api/assessment/submit"))
        .bearer_auth(&ben)
        .json(&serde_json::json!({ "responses": vec![0; 21] }))
        .send()
        .await
        .unwrap();
    app.client
        .post(app.url("/api/assessment/submit"))
        .bearer_auth(&ben)
        .json(&serde_json::json!({ "responses": vec![3; 21] }))
        .send()
        .await
        .unwrap();
    app.client
        .post(app.url("/api/quiz/bullying/submit"))
        .bearer_auth(&ben)
        .json(&serde_json::json!({ "selections": correct_selections(Topic::Bullying) }))
        .send()
        .await
        .unwrap();

    let counselor = app.counselor_token().await;

    let stats: serde_json::Value = app
        .client
        .get(app.url("/api/dashboard/overview"))
        .bearer_auth(&counselor)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(stats["total_students"], 3);
    assert_eq!(stats["safe_students"], 1);
    assert_eq!(stats["at_risk_students"], 1);
    // (100 + 60 + 100) / 3
    assert_eq!(stats["average_quiz_score"], 87);
    assert_eq!(stats["topic_attempts"]["emotions"], 2);
    assert_eq!(stats["topic_attempts"]["bullying"], 1);

    let class_5a: Vec<serde_json::Value> = app
        .client
        .get(app.url("/api/dashboard/students?class=5A"))
        .bearer_auth(&counselor)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(class_5a.len(), 2);
    let ava_row = class_5a
        .iter()
        .find(|s| s["full_name"] == "Ava Lim")
        .expect("Ava listed");
    assert_eq!(ava_row["quiz_results"].as_array().unwrap().len(), 2);
    assert_eq!(ava_row["latest_assessment"]["depression_level"], "normal");

    let search: Vec<serde_json::Value> = app
        .client
        .get(app.url("/api/dashboard/students?search=ong"))
        .bearer_auth(&counselor)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(search.len(), 1);
    assert_eq!(search[0]["latest_assessment"]["total_score"], 63);
    assert_eq!(search[0]["latest_assessment"]["total_level"], "extremelySevere");

    let ben_id = search[0]["id"].as_i64().unwrap();
    let progress: serde_json::Value = app
        .client
        .get(app.url(&format!("/api/dashboard/students/{}/progress", ben_id)))
        .bearer_auth(&counselor)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        progress["progress"]["assessmentResults"]["dass-y"]["scores"]["stress"],
        21
    );
    assert_eq!(progress["progress"]["topicProgress"]["bullying"]["quizScore"], 100);

    let missing = app
        .client
        .get(app.url("/api/dashboard/students/9999/progress"))
        .bearer_auth(&counselor)
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);
}
