// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, types::Json};

use crate::{
    models::{
        attempt::{LeaderboardEntry, NewQuizAttempt},
        question::{AnswerKey, OptionKey, PublicQuestion},
    },
    store::{QuizStore, StoreError},
};

/// `QuizStore` backed by the `questions` and `quiz_attempts` tables.
#[derive(Clone)]
pub struct PgQuizStore {
    pool: PgPool,
}

impl PgQuizStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Helper struct for fetching answer keys from the database.
#[derive(sqlx::FromRow)]
struct AnswerKeyRow {
    id: i64,
    correct_option: String,
}

impl TryFrom<AnswerKeyRow> for AnswerKey {
    type Error = StoreError;

    fn try_from(row: AnswerKeyRow) -> Result<Self, Self::Error> {
        let correct_option = row
            .correct_option
            .parse::<OptionKey>()
            .map_err(|e| StoreError::InvalidRecord(format!("question {}: {}", row.id, e)))?;
        Ok(AnswerKey {
            id: row.id,
            correct_option,
        })
    }
}

#[async_trait]
impl QuizStore for PgQuizStore {
    async fn list_questions(&self) -> Result<Vec<PublicQuestion>, StoreError> {
        let questions = sqlx::query_as::<_, PublicQuestion>(
            r#"
            SELECT id, question_text, option_a, option_b, option_c, option_d
            FROM questions
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    async fn correct_options(&self, question_ids: &[i64]) -> Result<Vec<AnswerKey>, StoreError> {
        if question_ids.is_empty() {
            return Ok(Vec::new());
        }

        // Use QueryBuilder for dynamic IN clause
        let mut query_builder = QueryBuilder::<Postgres>::new(
            "SELECT id, correct_option::TEXT AS correct_option FROM questions WHERE id IN (",
        );

        let mut separated = query_builder.separated(",");
        for id in question_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let rows: Vec<AnswerKeyRow> = query_builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(AnswerKey::try_from).collect()
    }

    async fn record_attempt(&self, attempt: &NewQuizAttempt) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO quiz_attempts (
                session_id, username, answers, score, total_questions,
                completion_time_seconds, achievements, completed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&attempt.session_id)
        .bind(&attempt.username)
        .bind(Json(&attempt.answers))
        .bind(attempt.score)
        .bind(attempt.total_questions)
        .bind(attempt.completion_time_seconds)
        .bind(&attempt.achievements)
        .bind(attempt.completed_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>, StoreError> {
        // Untimed runs (0 seconds) rank after timed ones with the same score.
        let entries = sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            SELECT
                id,
                username,
                score,
                total_questions,
                completion_time_seconds,
                completed_at,
                achievements
            FROM quiz_attempts
            ORDER BY
                score DESC,
                (completion_time_seconds = 0) ASC,
                completion_time_seconds ASC,
                completed_at ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
