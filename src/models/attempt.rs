// src/models/attempt.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{achievement::Achievement, question::OptionKey};

/// A single answered question as sent by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserAnswer {
    pub question_id: i64,
    pub selected_option: OptionKey,
}

/// DTO for submitting a finished quiz.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    /// Answered questions only, in question order.
    #[serde(default)]
    #[validate(length(min = 1, message = "Invalid answers provided"))]
    pub answers: Vec<UserAnswer>,

    /// Opaque client session identifier.
    #[serde(default)]
    pub session_id: String,

    pub username: Option<String>,

    /// Seconds spent on the quiz. Missing, 0 or negative means untimed;
    /// fractions are floored when scored.
    pub completion_time: Option<f64>,
}

/// Scored submission returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub score: i32,
    pub total_questions: i32,
    pub answers: Vec<UserAnswer>,
    /// Correct option per question id, revealed only after scoring.
    pub correct_answers: BTreeMap<i64, OptionKey>,
    pub achievements: Vec<Achievement>,
    pub percentage: f64,
}

/// Insert payload for the 'quiz_attempts' table.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuizAttempt {
    pub session_id: String,
    pub username: String,
    pub answers: Vec<UserAnswer>,
    pub score: i32,
    pub total_questions: i32,
    pub completion_time_seconds: i32,
    pub achievements: Vec<String>,
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

/// Represents a row of the 'quiz_attempts' table.
#[derive(Debug, Clone, FromRow)]
pub struct QuizAttempt {
    pub id: i64,
    pub session_id: String,
    pub username: String,
    pub answers: Json<Vec<UserAnswer>>,
    pub score: i32,
    pub total_questions: i32,
    pub completion_time_seconds: i32,
    pub achievements: Vec<String>,
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

/// Public projection of an attempt for the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LeaderboardEntry {
    pub id: i64,
    pub username: String,
    pub score: i32,
    pub total_questions: i32,
    pub completion_time_seconds: i32,
    pub completed_at: chrono::DateTime<chrono::Utc>,
    pub achievements: Vec<String>,
}

impl From<&QuizAttempt> for LeaderboardEntry {
    fn from(attempt: &QuizAttempt) -> Self {
        LeaderboardEntry {
            id: attempt.id,
            username: attempt.username.clone(),
            score: attempt.score,
            total_questions: attempt.total_questions,
            completion_time_seconds: attempt.completion_time_seconds,
            completed_at: attempt.completed_at,
            achievements: attempt.achievements.clone(),
        }
    }
}

/// Query parameters for the leaderboard.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaderboardParams {
    /// Number of entries, clamped to 1..=100.
    pub limit: Option<i64>,
}
