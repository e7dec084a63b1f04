// tests/common/mod.rs

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use quiz_backend::{
    config::Config,
    models::question::{OptionKey, Question},
    routes,
    state::AppState,
    store::MemoryStore,
};

#[allow(dead_code)]
pub struct TestApp {
    pub address: String,
    pub store: Arc<MemoryStore>,
    pub client: reqwest::Client,
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        rust_log: "error".to_string(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        allowed_origins: vec!["http://localhost:3000".to_string()],
        leaderboard_limit: 10,
        static_dir: None,
        log_dir: "logs".to_string(),
    }
}

/// Ten questions with ids 1..=10; the correct option cycles A, B, C, D.
pub fn sample_questions() -> Vec<Question> {
    let keys = [OptionKey::A, OptionKey::B, OptionKey::C, OptionKey::D];
    (1..=10)
        .map(|id: i64| Question {
            id,
            question_text: format!("Question {}", id),
            option_a: format!("{} a", id),
            option_b: format!("{} b", id),
            option_c: format!("{} c", id),
            option_d: format!("{} d", id),
            correct_option: keys[(id as usize - 1) % 4],
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(id),
        })
        .collect()
}

pub fn correct_option_for(id: i64) -> &'static str {
    ["A", "B", "C", "D"][(id as usize - 1) % 4]
}

/// Helper function to spawn the app on a random port for testing.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(MemoryStore::with_questions(sample_questions())).await
}

pub async fn spawn_app_with(store: MemoryStore) -> TestApp {
    let store = Arc::new(store);
    let state = AppState {
        store: store.clone(),
        config: test_config(),
    };

    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address,
        store,
        client: reqwest::Client::new(),
    }
}

pub fn session_id() -> String {
    format!("session_{}", &uuid::Uuid::new_v4().to_string()[..8])
}
