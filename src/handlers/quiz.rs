// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    response::IntoResponse,
};

use crate::{
    config::{Config, MAX_LEADERBOARD_LIMIT},
    error::{AppError, ErrorBody},
    models::{
        attempt::{LeaderboardEntry, LeaderboardParams, QuizResult, SubmitQuizRequest},
        question::QuestionList,
    },
    scoring::{INVALID_ANSWERS_MESSAGE, Submission, evaluate_submission},
    store::SharedStore,
};

/// Lists every question without its correct option, in creation order.
#[utoipa::path(
    get,
    path = "/api/quiz/questions",
    tag = "Quiz",
    responses(
        (status = 200, description = "Questions for the client", body = QuestionList),
        (status = 500, description = "Questions could not be read", body = ErrorBody)
    )
)]
pub async fn list_questions(State(store): State<SharedStore>) -> Result<impl IntoResponse, AppError> {
    let questions = store
        .list_questions()
        .await
        .map_err(|source| AppError::StoreReadFailure {
            context: "Failed to fetch questions",
            source,
        })?;

    Ok(Json(QuestionList { questions }))
}

/// Scores a finished quiz.
///
/// * Rejects a missing, malformed or empty answer list before touching the store.
/// * Reveals the correct options for the submitted questions.
/// * Records the attempt for the leaderboard; a failed write does not fail the request.
#[utoipa::path(
    post,
    path = "/api/quiz/submit",
    tag = "Quiz",
    request_body = SubmitQuizRequest,
    responses(
        (status = 200, description = "Scored result", body = QuizResult),
        (status = 400, description = "Invalid answers", body = ErrorBody),
        (status = 500, description = "Scoring data could not be read", body = ErrorBody)
    )
)]
pub async fn submit_quiz(
    State(store): State<SharedStore>,
    payload: Result<Json<SubmitQuizRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!("Malformed submission body: {}", rejection.body_text());
        AppError::BadRequest(INVALID_ANSWERS_MESSAGE.to_string())
    })?;

    let submission = Submission::from_request(req)?;
    let result = evaluate_submission(store.as_ref(), submission).await?;

    Ok(Json(result))
}

/// Retrieves the best attempts, highest score first and faster runs breaking ties.
#[utoipa::path(
    get,
    path = "/api/leaderboard",
    tag = "Leaderboard",
    params(LeaderboardParams),
    responses(
        (status = 200, description = "Ranked attempts", body = [LeaderboardEntry]),
        (status = 500, description = "Leaderboard could not be read", body = ErrorBody)
    )
)]
pub async fn get_leaderboard(
    State(store): State<SharedStore>,
    State(config): State<Config>,
    Query(params): Query<LeaderboardParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params
        .limit
        .unwrap_or(config.leaderboard_limit)
        .clamp(1, MAX_LEADERBOARD_LIMIT);

    let leaderboard = store
        .leaderboard(limit)
        .await
        .map_err(|source| AppError::StoreReadFailure {
            context: "Failed to fetch leaderboard",
            source,
        })?;

    Ok(Json(leaderboard))
}
