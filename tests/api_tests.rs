// tests/api_tests.rs

mod common;

use common::{correct_option_for, session_id, spawn_app, spawn_app_with};
use quiz_backend::store::MemoryStore;
use serde_json::{Value, json};

async fn submit(app: &common::TestApp, body: Value) -> reqwest::Response {
    app.client
        .post(format!("{}/api/quiz/submit", app.address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request")
}

#[tokio::test]
async fn unknown_path_is_404() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(format!("{}/random_path_that_does_not_exist", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(format!("{}/api/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn questions_are_listed_without_answers() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(format!("{}/api/quiz/questions", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let questions = body["questions"].as_array().expect("questions array");

    assert_eq!(questions.len(), 10);
    let ids: Vec<i64> = questions.iter().map(|q| q["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, (1..=10).collect::<Vec<i64>>());
    for q in questions {
        assert!(q.get("correct_option").is_none());
        assert!(q["option_d"].is_string());
    }
}

#[tokio::test]
async fn question_listing_failure_is_generic() {
    let store = MemoryStore::with_questions(common::sample_questions());
    store.set_fail_reads(true);
    let app = spawn_app_with(store).await;

    let response = app
        .client
        .get(format!("{}/api/quiz/questions", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to fetch questions");
}

#[tokio::test]
async fn submit_scores_mixed_answers() {
    let app = spawn_app().await;
    let session = session_id();

    // Question 1 expects A, question 2 expects B.
    let response = submit(
        &app,
        json!({
            "answers": [
                { "questionId": 1, "selectedOption": "A" },
                { "questionId": 2, "selectedOption": "C" }
            ],
            "sessionId": session,
            "completionTime": 120
        }),
    )
    .await;

    assert_eq!(response.status().as_u16(), 200);
    let result: Value = response.json().await.unwrap();
    assert_eq!(result["score"], 1);
    assert_eq!(result["totalQuestions"], 2);
    assert_eq!(result["percentage"], 50.0);
    assert_eq!(result["achievements"], json!(["Speed Demon", "First Timer"]));
    assert_eq!(result["correctAnswers"], json!({ "1": "A", "2": "B" }));
    assert_eq!(result["answers"][1]["selectedOption"], "C");

    let attempts = app.store.attempts();
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].session_id, session);
    assert_eq!(attempts[0].username, "Anonymous");
    assert_eq!(attempts[0].completion_time_seconds, 120);
}

#[tokio::test]
async fn perfect_fast_run_earns_every_badge() {
    let app = spawn_app().await;

    let answers: Vec<Value> = (1..=10)
        .map(|id| json!({ "questionId": id, "selectedOption": correct_option_for(id) }))
        .collect();

    let response = submit(
        &app,
        json!({
            "answers": answers,
            "sessionId": session_id(),
            "username": "Ada",
            "completionTime": 250
        }),
    )
    .await;

    assert_eq!(response.status().as_u16(), 200);
    let result: Value = response.json().await.unwrap();
    assert_eq!(result["score"], 10);
    assert_eq!(result["percentage"], 100.0);
    assert_eq!(
        result["achievements"],
        json!(["Perfect Score", "Sharp Shooter", "Speed Demon", "First Timer"])
    );
    assert_eq!(app.store.attempts()[0].username, "Ada");
}

#[tokio::test]
async fn untimed_run_gets_no_speed_badge() {
    let app = spawn_app().await;

    let answers: Vec<Value> = (1..=5)
        .map(|id| {
            let pick = if id == 5 { "D" } else { correct_option_for(id) };
            json!({ "questionId": id, "selectedOption": pick })
        })
        .collect();

    let result: Value = submit(&app, json!({ "answers": answers, "sessionId": session_id() }))
        .await
        .json()
        .await
        .unwrap();

    // Question 5 expects A, so 4 of 5 are right.
    assert_eq!(result["score"], 4);
    assert_eq!(result["percentage"], 80.0);
    assert_eq!(result["achievements"], json!(["Sharp Shooter", "First Timer"]));
    assert_eq!(app.store.attempts()[0].completion_time_seconds, 0);
}

#[tokio::test]
async fn empty_answers_are_rejected_before_store_access() {
    let app = spawn_app().await;

    let response = submit(&app, json!({ "answers": [], "sessionId": session_id() })).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid answers provided");
    assert_eq!(app.store.reads(), 0);
    assert!(app.store.attempts().is_empty());
}

#[tokio::test]
async fn malformed_answers_are_rejected() {
    let app = spawn_app().await;

    let bodies = [
        json!({ "sessionId": "s" }),
        json!({ "answers": "A,B,C", "sessionId": "s" }),
        json!({ "answers": null, "sessionId": "s" }),
        json!({ "answers": [{ "questionId": 1, "selectedOption": "E" }], "sessionId": "s" }),
    ];

    for body in bodies {
        let response = submit(&app, body.clone()).await;
        assert_eq!(response.status().as_u16(), 400, "body: {}", body);
        let error: Value = response.json().await.unwrap();
        assert_eq!(error["error"], "Invalid answers provided");
    }

    assert_eq!(app.store.reads(), 0);
}

#[tokio::test]
async fn non_json_body_is_rejected() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(format!("{}/api/quiz/submit", app.address))
        .header("Content-Type", "text/plain")
        .body("answers=A")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn read_failure_fails_the_submission() {
    let store = MemoryStore::with_questions(common::sample_questions());
    store.set_fail_reads(true);
    let app = spawn_app_with(store).await;

    let response = submit(
        &app,
        json!({
            "answers": [{ "questionId": 1, "selectedOption": "A" }],
            "sessionId": session_id()
        }),
    )
    .await;

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to fetch questions for scoring");
    assert!(body.get("score").is_none());
    assert!(app.store.attempts().is_empty());
}

#[tokio::test]
async fn write_failure_still_returns_result() {
    let store = MemoryStore::with_questions(common::sample_questions());
    store.set_fail_writes(true);
    let app = spawn_app_with(store).await;

    let response = submit(
        &app,
        json!({
            "answers": [{ "questionId": 2, "selectedOption": "B" }],
            "sessionId": session_id(),
            "completionTime": 30
        }),
    )
    .await;

    assert_eq!(response.status().as_u16(), 200);
    let result: Value = response.json().await.unwrap();
    assert_eq!(result["score"], 1);
    assert_eq!(
        result["achievements"],
        json!(["Perfect Score", "Sharp Shooter", "Speed Demon", "First Timer"])
    );
    assert!(app.store.attempts().is_empty());
}

#[tokio::test]
async fn unknown_questions_are_scored_against_submission_size() {
    let app = spawn_app().await;

    let result: Value = submit(
        &app,
        json!({
            "answers": [
                { "questionId": 3, "selectedOption": "C" },
                { "questionId": 999, "selectedOption": "A" }
            ],
            "sessionId": session_id()
        }),
    )
    .await
    .json()
    .await
    .unwrap();

    assert_eq!(result["score"], 1);
    assert_eq!(result["totalQuestions"], 2);
    assert_eq!(result["percentage"], 50.0);
    assert_eq!(result["correctAnswers"], json!({ "3": "C" }));
}

#[tokio::test]
async fn usernames_are_stripped_of_markup() {
    let app = spawn_app().await;

    let response = submit(
        &app,
        json!({
            "answers": [{ "questionId": 1, "selectedOption": "A" }],
            "sessionId": session_id(),
            "username": "<script>alert(1)</script><b>Eve</b>"
        }),
    )
    .await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(app.store.attempts()[0].username, "Eve");
}

#[tokio::test]
async fn leaderboard_ranks_submissions() {
    let app = spawn_app().await;

    let runs = [
        ("half_fast", 2, 60),
        ("full_slow", 4, 500),
        ("full_fast", 4, 200),
        ("full_untimed", 4, 0),
    ];

    for (name, correct, seconds) in runs {
        let answers: Vec<Value> = (1..=4)
            .map(|id| {
                let pick = if id <= correct { correct_option_for(id) } else { "D" };
                json!({ "questionId": id, "selectedOption": pick })
            })
            .collect();
        let response = submit(
            &app,
            json!({
                "answers": answers,
                "sessionId": session_id(),
                "username": name,
                "completionTime": seconds
            }),
        )
        .await;
        assert_eq!(response.status().as_u16(), 200);
    }

    let entries: Vec<Value> = app
        .client
        .get(format!("{}/api/leaderboard", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();

    let names: Vec<&str> = entries.iter().map(|e| e["username"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["full_fast", "full_slow", "full_untimed", "half_fast"]);
    assert_eq!(entries[0]["total_questions"], 4);
    assert_eq!(entries[0]["completion_time_seconds"], 200);
    assert!(entries[0]["completed_at"].is_string());
    assert_eq!(
        entries[0]["achievements"],
        json!(["Perfect Score", "Sharp Shooter", "Speed Demon", "First Timer"])
    );
    assert!(entries[0].get("answers").is_none());
    assert!(entries[0].get("session_id").is_none());

    let top: Vec<Value> = app
        .client
        .get(format!("{}/api/leaderboard?limit=2", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(top.len(), 2);
}

#[tokio::test]
async fn openapi_document_lists_routes() {
    let app = spawn_app().await;

    let doc: Value = app
        .client
        .get(format!("{}/api-docs/openapi.json", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();

    assert!(doc["paths"]["/api/quiz/submit"]["post"].is_object());
    assert!(doc["paths"]["/api/quiz/questions"]["get"].is_object());
    assert!(doc["paths"]["/api/leaderboard"]["get"].is_object());
}

#[tokio::test]
async fn completion_time_accepts_any_number() {
    let app = spawn_app().await;

    // (sent, stored, speed badge)
    let cases = [
        (json!(120.5), 120, true),
        (json!(-5), 0, false),
        (json!(3_000_000_000_i64), i32::MAX, false),
    ];

    for (sent, stored, speedy) in cases {
        let response = submit(
            &app,
            json!({
                "answers": [{ "questionId": 1, "selectedOption": "B" }],
                "sessionId": session_id(),
                "completionTime": sent
            }),
        )
        .await;

        assert_eq!(response.status().as_u16(), 200, "completionTime: {}", sent);
        let result: Value = response.json().await.unwrap();
        let badges: Vec<&str> = result["achievements"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a.as_str().unwrap())
            .collect();
        assert_eq!(badges.contains(&"Speed Demon"), speedy, "completionTime: {}", sent);
        assert_eq!(
            app.store.attempts().last().unwrap().completion_time_seconds,
            stored
        );
    }
}

#[tokio::test]
async fn username_keeps_non_breaking_space() {
    let app = spawn_app().await;

    let response = submit(
        &app,
        json!({
            "answers": [{ "questionId": 1, "selectedOption": "A" }],
            "sessionId": session_id(),
            "username": "caf\u{e9}\u{a0}bar"
        }),
    )
    .await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(app.store.attempts()[0].username, "caf\u{e9}\u{a0}bar");
}

#[tokio::test]
async fn leaderboard_limit_is_clamped() {
    let app = spawn_app().await;

    for _ in 0..3 {
        let response = submit(
            &app,
            json!({
                "answers": [{ "questionId": 1, "selectedOption": "A" }],
                "sessionId": session_id()
            }),
        )
        .await;
        assert_eq!(response.status().as_u16(), 200);
    }

    for (limit, expected) in [(0, 1), (-4, 1), (1000, 3)] {
        let response = app
            .client
            .get(format!("{}/api/leaderboard?limit={}", app.address, limit))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status().as_u16(), 200);
        let entries: Vec<Value> = response.json().await.unwrap();
        assert_eq!(entries.len(), expected, "limit={}", limit);
    }
}

#[tokio::test]
async fn leaderboard_read_failure_is_generic() {
    let store = MemoryStore::with_questions(common::sample_questions());
    store.set_fail_reads(true);
    let app = spawn_app_with(store).await;

    let response = app
        .client
        .get(format!("{}/api/leaderboard", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to fetch leaderboard");
}
