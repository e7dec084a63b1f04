// src/docs.rs

use axum::{Json, response::IntoResponse};
use utoipa::OpenApi;

use crate::{
    error::ErrorBody,
    handlers::{health, quiz},
    models::{
        achievement::Achievement,
        attempt::{LeaderboardEntry, QuizResult, SubmitQuizRequest, UserAnswer},
        question::{OptionKey, PublicQuestion, QuestionList},
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        quiz::list_questions,
        quiz::submit_quiz,
        quiz::get_leaderboard,
    ),
    components(schemas(
        Achievement,
        ErrorBody,
        LeaderboardEntry,
        OptionKey,
        PublicQuestion,
        QuestionList,
        QuizResult,
        SubmitQuizRequest,
        UserAnswer,
    )),
    tags(
        (name = "System", description = "Service endpoints"),
        (name = "Quiz", description = "Question listing and scoring"),
        (name = "Leaderboard", description = "Public ranking of attempts")
    )
)]
pub struct ApiDoc;

/// Serves the generated OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
