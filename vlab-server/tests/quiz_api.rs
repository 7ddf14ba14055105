//! Quiz route integration tests

mod common;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use serde_json::json;

use common::{LEARNER_TOKEN, bearer, create_test_server};

fn auth_header() -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("authorization"),
        HeaderValue::from_str(&bearer(LEARNER_TOKEN)).unwrap(),
    )
}

/// Build a submission body from (question id, answer) pairs
fn submission_body(quiz_id: &str, answers: &[(&str, serde_json::Value)]) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = answers
        .iter()
        .map(|(id, value)| (id.to_string(), value.clone()))
        .collect();
    json!({"quiz_id": quiz_id, "answers": map})
}

/// Fetch the seeded pretest as (quiz_id, ordered question ids)
async fn fetch_pretest(server: &axum_test::TestServer) -> (String, Vec<String>) {
    let response = server
        .get("/api/experiments/raspberry-pi-intro/quiz/pretest")
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let quiz_id = body["quiz"]["id"].as_str().unwrap().to_string();
    let question_ids = body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_str().unwrap().to_string())
        .collect();
    (quiz_id, question_ids)
}

#[tokio::test]
async fn quiz_fetch_returns_ordered_questions_with_key() {
    let (server, _store) = create_test_server().await;

    let response = server
        .get("/api/experiments/raspberry-pi-intro/quiz/pretest")
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    assert_eq!(body["quiz"]["quiz_type"], json!("pretest"));
    assert_eq!(body["quiz"]["passing_percentage"], json!(70));

    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0]["display_order"], json!(1));
    assert_eq!(questions[1]["display_order"], json!(2));
    // The key ships with the questions for local review
    assert_eq!(questions[0]["correct_answer"], json!(1));
}

#[tokio::test]
async fn quiz_fetch_unknown_type_is_bad_request() {
    let (server, _store) = create_test_server().await;
    let response = server
        .get("/api/experiments/raspberry-pi-intro/quiz/midterm")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn quiz_fetch_unknown_experiment_is_not_found() {
    let (server, _store) = create_test_server().await;
    let response = server.get("/api/experiments/nope/quiz/pretest").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn submission_requires_identity() {
    let (server, _store) = create_test_server().await;
    let (quiz_id, question_ids) = fetch_pretest(&server).await;

    let response = server
        .post("/api/quiz-submissions")
        .json(&submission_body(
            &quiz_id,
            &[(&question_ids[0], json!(1)), (&question_ids[1], json!(2))],
        ))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn full_marks_passes_the_quiz() {
    let (server, _store) = create_test_server().await;
    let (quiz_id, question_ids) = fetch_pretest(&server).await;

    let (name, value) = auth_header();
    let response = server
        .post("/api/quiz-submissions")
        .add_header(name, value)
        .json(&submission_body(
            &quiz_id,
            &[(&question_ids[0], json!(1)), (&question_ids[1], json!(2))],
        ))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["score"], json!(2));
    assert_eq!(body["data"]["total_questions"], json!(2));
    assert_eq!(body["data"]["percentage"], json!(100));
    assert_eq!(body["data"]["passed"], json!(true));
}

#[tokio::test]
async fn half_marks_fails_a_seventy_percent_threshold() {
    let (server, _store) = create_test_server().await;
    let (quiz_id, question_ids) = fetch_pretest(&server).await;

    // String-encoded answers are normalized before comparison
    let (name, value) = auth_header();
    let response = server
        .post("/api/quiz-submissions")
        .add_header(name, value)
        .json(&submission_body(
            &quiz_id,
            &[(&question_ids[0], json!("1")), (&question_ids[1], json!("0"))],
        ))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["score"], json!(1));
    assert_eq!(body["data"]["percentage"], json!(50));
    assert_eq!(body["data"]["passed"], json!(false));
}

#[tokio::test]
async fn incomplete_answer_map_is_bad_request() {
    let (server, _store) = create_test_server().await;
    let (quiz_id, question_ids) = fetch_pretest(&server).await;

    let (name, value) = auth_header();
    let response = server
        .post("/api/quiz-submissions")
        .add_header(name, value)
        .json(&submission_body(&quiz_id, &[(&question_ids[0], json!(1))]))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unusable_answer_key_is_bad_request() {
    let (server, store) = create_test_server().await;
    let (quiz_id, question_ids) = fetch_pretest(&server).await;

    // A question whose stored key can never normalize to an index
    store
        .insert_question(&vlab_core::QuizQuestion {
            id: "q-garbled".to_string(),
            quiz_id: quiz_id.clone(),
            question_text: "Which pin?".to_string(),
            options: vec!["a".to_string(), "b".to_string()],
            correct_answer: vlab_core::AnswerIndex::Text("abc".to_string()),
            explanation: None,
            display_order: 3,
        })
        .await
        .unwrap();

    let (name, value) = auth_header();
    let response = server
        .post("/api/quiz-submissions")
        .add_header(name, value)
        .json(&submission_body(
            &quiz_id,
            &[
                (&question_ids[0], json!(1)),
                (&question_ids[1], json!(2)),
                ("q-garbled", json!(0)),
            ],
        ))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_quiz_is_not_found() {
    let (server, _store) = create_test_server().await;

    let (name, value) = auth_header();
    let response = server
        .post("/api/quiz-submissions")
        .add_header(name, value)
        .json(&json!({"quiz_id": "missing", "answers": {}}))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn posttest_string_encoded_key_is_normalized() {
    let (server, _store) = create_test_server().await;

    let response = server
        .get("/api/experiments/raspberry-pi-intro/quiz/posttest")
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let quiz_id = body["quiz"]["id"].as_str().unwrap().to_string();
    let question_id = body["questions"][0]["id"].as_str().unwrap().to_string();
    // Seeded as the numeric string "1"
    assert_eq!(body["questions"][0]["correct_answer"], json!("1"));

    let (name, value) = auth_header();
    let response = server
        .post("/api/quiz-submissions")
        .add_header(name, value)
        .json(&submission_body(&quiz_id, &[(&question_id, json!(1))]))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["percentage"], json!(100));
    assert_eq!(body["data"]["passed"], json!(true));
}
