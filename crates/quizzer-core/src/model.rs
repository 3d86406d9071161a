//! Core data model types for quizzer.
//!
//! A [`Quiz`] is owned by whichever [`QuizStore`](crate::traits::QuizStore)
//! holds it; the engine only borrows copies for the duration of a command.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::StoreError;

/// Store-assigned primary key of a quiz.
pub type QuizId = i64;

/// A single question/answer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    /// Unique identifier, assigned by the store.
    pub id: QuizId,
    /// The question text, shown to the player.
    pub question: String,
    /// The expected answer.
    pub answer: String,
    /// When the store first saved this quiz.
    pub created_at: DateTime<Utc>,
    /// When the store last changed this quiz.
    pub updated_at: DateTime<Utc>,
}

impl Quiz {
    /// Whether `response` answers this quiz.
    ///
    /// Both sides are trimmed and lowercased; anything else must match
    /// exactly.
    pub fn is_answered_by(&self, response: &str) -> bool {
        normalize(response) == normalize(&self.answer)
    }
}

impl fmt::Display for Quiz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {} => {}", self.id, self.question, self.answer)
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Question/answer content that has not been saved yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDraft {
    pub question: String,
    pub answer: String,
}

impl QuizDraft {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Content rules every store enforces before saving.
    pub fn validate(&self) -> Result<(), StoreError> {
        let mut messages = Vec::new();
        if self.question.trim().is_empty() {
            messages.push("question must not be empty".to_string());
        }
        if self.answer.trim().is_empty() {
            messages.push("answer must not be empty".to_string());
        }

        if messages.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Validation(messages))
        }
    }
}

/// The quizzes a new store starts with.
pub fn default_quizzes() -> Vec<QuizDraft> {
    vec![
        QuizDraft::new("Capital of Italy", "Rome"),
        QuizDraft::new("Capital of France", "Paris"),
        QuizDraft::new("Capital of Spain", "Madrid"),
        QuizDraft::new("Capital of Portugal", "Lisbon"),
    ]
}
