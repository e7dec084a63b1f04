// src/session.rs

//! Client-side quiz progress: which question is shown, what has been picked,
//! and how much time is left. Owned by the caller and passed around
//! explicitly; nothing here talks to the store.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::{
    config::QUIZ_TIME_LIMIT_SECONDS,
    models::{attempt::UserAnswer, question::{OptionKey, PublicQuestion}},
};

/// Navigation and answer state for one run through a question list.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<PublicQuestion>,
    current_index: usize,
    answers: HashMap<i64, OptionKey>,
}

impl QuizSession {
    pub fn new(questions: Vec<PublicQuestion>) -> Self {
        Self {
            questions,
            current_index: 0,
            answers: HashMap::new(),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&PublicQuestion> {
        self.questions.get(self.current_index)
    }

    pub fn selected_option(&self) -> Option<OptionKey> {
        self.current_question()
            .and_then(|q| self.answers.get(&q.id).copied())
    }

    /// Records (or replaces) the pick for the current question.
    pub fn select_option(&mut self, option: OptionKey) {
        if let Some(id) = self.current_question().map(|q| q.id) {
            self.answers.insert(id, option);
        }
    }

    pub fn go_to_next(&mut self) {
        if self.can_go_next() {
            self.current_index += 1;
        }
    }

    pub fn go_to_previous(&mut self) {
        if self.can_go_previous() {
            self.current_index -= 1;
        }
    }

    /// Out-of-range indexes are ignored.
    pub fn go_to_question(&mut self, index: usize) {
        if index < self.questions.len() {
            self.current_index = index;
        }
    }

    /// Answered questions only, in question order, ready for submission.
    pub fn user_answers(&self) -> Vec<UserAnswer> {
        self.questions
            .iter()
            .filter_map(|q| {
                self.answers.get(&q.id).map(|&selected_option| UserAnswer {
                    question_id: q.id,
                    selected_option,
                })
            })
            .collect()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_complete(&self) -> bool {
        self.questions.iter().all(|q| self.answers.contains_key(&q.id))
    }

    pub fn can_go_next(&self) -> bool {
        self.current_index + 1 < self.questions.len()
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_index > 0
    }

    pub fn is_last_question(&self) -> bool {
        !self.questions.is_empty() && self.current_index == self.questions.len() - 1
    }
}

/// Fixed-length quiz countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub duration_seconds: i64,
}

impl Default for Countdown {
    fn default() -> Self {
        Self {
            duration_seconds: QUIZ_TIME_LIMIT_SECONDS,
        }
    }
}

impl Countdown {
    pub fn new(duration_seconds: i64) -> Self {
        Self { duration_seconds }
    }

    pub fn remaining(&self, elapsed_seconds: i64) -> i64 {
        (self.duration_seconds - elapsed_seconds.max(0)).max(0)
    }

    pub fn is_expired(&self, elapsed_seconds: i64) -> bool {
        self.remaining(elapsed_seconds) == 0
    }

    /// Last minute.
    pub fn is_low_time(&self, elapsed_seconds: i64) -> bool {
        self.remaining(elapsed_seconds) <= 60
    }

    /// Last 30 seconds.
    pub fn is_critical(&self, elapsed_seconds: i64) -> bool {
        self.remaining(elapsed_seconds) <= 30
    }
}

/// Whole seconds between start and finish, floored and never negative.
pub fn completion_seconds(started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> i32 {
    let seconds = (finished_at - started_at).num_seconds().max(0);
    i32::try_from(seconds).unwrap_or(i32::MAX)
}

/// `m:ss`, as shown on the leaderboard.
pub fn format_duration(seconds: i32) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
