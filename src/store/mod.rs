// src/store/mod.rs

//! Persistence seam for questions and quiz attempts.
//!
//! Handlers and the scoring flow only talk to [`QuizStore`]; the Postgres
//! implementation is used in production and [`memory::MemoryStore`] runs
//! in-process for tests and local demos.

pub mod memory;
pub mod postgres;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{
    attempt::{LeaderboardEntry, NewQuizAttempt},
    question::{AnswerKey, PublicQuestion},
};

pub use memory::MemoryStore;
pub use postgres::PgQuizStore;

pub type SharedStore = Arc<dyn QuizStore>;

#[derive(Debug)]
pub enum StoreError {
    Database(sqlx::Error),
    /// A stored row could not be mapped to the domain model.
    InvalidRecord(String),
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Database(e) => write!(f, "database error: {}", e),
            StoreError::InvalidRecord(msg) => write!(f, "invalid record: {}", msg),
            StoreError::Unavailable(msg) => write!(f, "store unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}

#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Every question's public fields in creation order.
    async fn list_questions(&self) -> Result<Vec<PublicQuestion>, StoreError>;

    /// Correct options for the given ids. Unknown ids are skipped.
    async fn correct_options(&self, question_ids: &[i64]) -> Result<Vec<AnswerKey>, StoreError>;

    /// Appends one attempt.
    async fn record_attempt(&self, attempt: &NewQuizAttempt) -> Result<(), StoreError>;

    /// Best attempts first: score descending, then faster timed runs, then older.
    async fn leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>, StoreError>;
}
