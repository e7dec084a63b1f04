// src/scoring.rs

//! Scoring engine: compares submitted answers with the stored answer key,
//! derives the percentage and badges, and records the attempt.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use validator::Validate;

use crate::{
    config::{DEFAULT_USERNAME, SHARP_SHOOTER_PERCENTAGE, SPEED_DEMON_MAX_SECONDS},
    error::AppError,
    models::{
        achievement::Achievement,
        attempt::{NewQuizAttempt, QuizResult, SubmitQuizRequest, UserAnswer},
        question::{AnswerKey, OptionKey},
    },
    store::QuizStore,
    utils::html::clean_username,
};

pub const INVALID_ANSWERS_MESSAGE: &str = "Invalid answers provided";
pub const SCORING_READ_FAILURE_MESSAGE: &str = "Failed to fetch questions for scoring";

/// A submission that passed validation, with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub answers: Vec<UserAnswer>,
    pub session_id: String,
    pub username: String,
    pub completion_time: i32,
}

impl Submission {
    pub fn from_request(req: SubmitQuizRequest) -> Result<Self, AppError> {
        if let Err(validation_errors) = req.validate() {
            tracing::debug!("Rejected submission: {}", validation_errors);
            if validation_errors.field_errors().contains_key("answers") {
                return Err(AppError::BadRequest(INVALID_ANSWERS_MESSAGE.to_string()));
            }
            return Err(AppError::BadRequest(validation_errors.to_string()));
        }

        let username = req
            .username
            .as_deref()
            .map(clean_username)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string());

        Ok(Submission {
            answers: req.answers,
            session_id: req.session_id,
            username,
            completion_time: req.completion_time.map(whole_seconds).unwrap_or(0),
        })
    }
}

/// Floors a client-reported duration to whole seconds within `0..=i32::MAX`.
/// Negative and non-finite values count as untimed.
pub fn whole_seconds(seconds: f64) -> i32 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    // `as` saturates for floats above i32::MAX.
    seconds.floor() as i32
}

/// Outcome of comparing answers with the answer key.
#[derive(Debug, Clone, PartialEq)]
pub struct Scorecard {
    pub score: i32,
    pub correct_answers: BTreeMap<i64, OptionKey>,
}

/// Distinct question ids in ascending order.
pub fn distinct_question_ids(answers: &[UserAnswer]) -> Vec<i64> {
    answers
        .iter()
        .map(|a| a.question_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Scores answers against the keys the store returned.
///
/// Each key is matched against the first submitted answer with the same
/// question id; later duplicates are ignored. Answers for questions the store
/// does not know never score.
pub fn score_answers(answers: &[UserAnswer], keys: &[AnswerKey]) -> Scorecard {
    let mut score = 0;
    let mut correct_answers = BTreeMap::new();

    for key in keys {
        correct_answers.insert(key.id, key.correct_option);
        let submitted = answers.iter().find(|a| a.question_id == key.id);
        if submitted.is_some_and(|a| a.selected_option == key.correct_option) {
            score += 1;
        }
    }

    Scorecard {
        score,
        correct_answers,
    }
}

/// Unrounded share of correct answers, out of 100.
pub fn percentage(score: i32, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (score as f64 / total as f64) * 100.0
}

/// Badges in display order. "First Timer" is always granted.
pub fn achievements_for(percentage: f64, completion_time: i32) -> Vec<Achievement> {
    let mut achievements = Vec::new();

    if percentage == 100.0 {
        achievements.push(Achievement::PerfectScore);
    }
    if percentage >= SHARP_SHOOTER_PERCENTAGE {
        achievements.push(Achievement::SharpShooter);
    }
    if completion_time > 0 && completion_time <= SPEED_DEMON_MAX_SECONDS {
        achievements.push(Achievement::SpeedDemon);
    }
    achievements.push(Achievement::FirstTimer);

    achievements
}

/// Letter grade shown next to a result, from the rounded percentage.
pub fn letter_grade(percentage: f64) -> &'static str {
    match percentage.round() {
        p if p >= 90.0 => "A+",
        p if p >= 80.0 => "A",
        p if p >= 70.0 => "B",
        p if p >= 60.0 => "C",
        p if p >= 50.0 => "D",
        _ => "F",
    }
}

/// Scores a validated submission and records the attempt.
///
/// * Reads correct options for exactly the submitted question ids; a failed
///   read fails the whole submission.
/// * Persisting the attempt is best-effort: a failed write is logged and the
///   result is still returned.
#[tracing::instrument(
    skip(store, submission),
    fields(session_id = %submission.session_id, answers = submission.answers.len())
)]
pub async fn evaluate_submission(
    store: &dyn QuizStore,
    submission: Submission,
) -> Result<QuizResult, AppError> {
    if submission.answers.is_empty() {
        return Err(AppError::BadRequest(INVALID_ANSWERS_MESSAGE.to_string()));
    }

    let question_ids = distinct_question_ids(&submission.answers);

    let keys = store
        .correct_options(&question_ids)
        .await
        .map_err(|source| AppError::StoreReadFailure {
            context: SCORING_READ_FAILURE_MESSAGE,
            source,
        })?;

    let Scorecard {
        score,
        correct_answers,
    } = score_answers(&submission.answers, &keys);

    let total = submission.answers.len();
    let total_questions = i32::try_from(total)
        .map_err(|_| AppError::BadRequest(INVALID_ANSWERS_MESSAGE.to_string()))?;
    let percentage = percentage(score, total);
    let achievements = achievements_for(percentage, submission.completion_time);

    let attempt = NewQuizAttempt {
        session_id: submission.session_id,
        username: submission.username,
        answers: submission.answers,
        score,
        total_questions,
        completion_time_seconds: submission.completion_time,
        achievements: achievements.iter().map(|a| a.name().to_string()).collect(),
        completed_at: Utc::now(),
    };

    if let Err(e) = store.record_attempt(&attempt).await {
        tracing::error!("Failed to save quiz attempt: {}", e);
    }

    tracing::info!(score, total_questions, percentage, "Quiz scored");

    Ok(QuizResult {
        score,
        total_questions,
        answers: attempt.answers,
        correct_answers,
        achievements,
        percentage,
    })
}
