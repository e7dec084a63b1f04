// src/store/memory.rs

use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use sqlx::types::Json;

use crate::{
    models::{
        attempt::{LeaderboardEntry, NewQuizAttempt, QuizAttempt},
        question::{AnswerKey, PublicQuestion, Question},
    },
    store::{QuizStore, StoreError},
};

/// In-process `QuizStore`.
///
/// Reads and writes can be switched to fail, and every read is counted, so
/// callers can check how the scoring flow behaves around the store.
#[derive(Default)]
pub struct MemoryStore {
    questions: Mutex<Vec<Question>>,
    attempts: Mutex<Vec<QuizAttempt>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    reads: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_questions(questions: Vec<Question>) -> Self {
        let store = Self::new();
        if let Ok(mut guard) = store.questions.lock() {
            *guard = questions;
        }
        store
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of read calls served or refused so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Snapshot of every recorded attempt, oldest first.
    pub fn attempts(&self) -> Vec<QuizAttempt> {
        self.attempts
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn begin_read(&self) -> Result<(), StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("reads are disabled".to_string()));
        }
        Ok(())
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn list_questions(&self) -> Result<Vec<PublicQuestion>, StoreError> {
        self.begin_read()?;
        let questions = self.questions.lock().map_err(poisoned)?;

        let mut ordered: Vec<&Question> = questions.iter().collect();
        ordered.sort_by_key(|q| (q.created_at, q.id));
        Ok(ordered.into_iter().map(Question::to_public).collect())
    }

    async fn correct_options(&self, question_ids: &[i64]) -> Result<Vec<AnswerKey>, StoreError> {
        self.begin_read()?;
        let questions = self.questions.lock().map_err(poisoned)?;

        Ok(questions
            .iter()
            .filter(|q| question_ids.contains(&q.id))
            .map(|q| AnswerKey {
                id: q.id,
                correct_option: q.correct_option,
            })
            .collect())
    }

    async fn record_attempt(&self, attempt: &NewQuizAttempt) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes are disabled".to_string()));
        }
        let mut attempts = self.attempts.lock().map_err(poisoned)?;

        let id = i64::try_from(attempts.len())
            .map_err(|_| StoreError::Unavailable("attempt table is full".to_string()))?
            + 1;
        attempts.push(QuizAttempt {
            id,
            session_id: attempt.session_id.clone(),
            username: attempt.username.clone(),
            answers: Json(attempt.answers.clone()),
            score: attempt.score,
            total_questions: attempt.total_questions,
            completion_time_seconds: attempt.completion_time_seconds,
            achievements: attempt.achievements.clone(),
            completed_at: attempt.completed_at,
        });
        Ok(())
    }

    async fn leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>, StoreError> {
        self.begin_read()?;
        let attempts = self.attempts.lock().map_err(poisoned)?;

        let mut ranked: Vec<&QuizAttempt> = attempts.iter().collect();
        ranked.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then((a.completion_time_seconds == 0).cmp(&(b.completion_time_seconds == 0)))
                .then(a.completion_time_seconds.cmp(&b.completion_time_seconds))
                .then(a.completed_at.cmp(&b.completed_at))
        });

        let limit = usize::try_from(limit.max(0)).unwrap_or(0);
        Ok(ranked
            .into_iter()
            .take(limit)
            .map(LeaderboardEntry::from)
            .collect())
    }
}
