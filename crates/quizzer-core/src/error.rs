//! Error types for the store, the prompter, and command handling.
//!
//! Store and prompter failures are converted into [`CommandError`] at the
//! command boundary, where the engine decides whether to report and carry on
//! or to stop the session.

use thiserror::Error;

use crate::model::QuizId;

/// Errors a [`QuizStore`](crate::traits::QuizStore) can return.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No quiz has this id.
    #[error("quiz {0} not found")]
    NotFound(QuizId),

    /// The store rejected the quiz content.
    #[error("invalid quiz: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The store could not be read or written.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors a [`Prompter`](crate::traits::Prompter) can return.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The input stream reached end of file.
    #[error("input closed")]
    Closed,

    /// Reading the input or writing the prompt failed.
    #[error("input error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything that can end a command early.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A command that needs an id was issued without one.
    #[error("missing id parameter")]
    MissingParameter,

    /// The id argument has no leading integer.
    #[error("`{0}` is not a valid id")]
    NotANumber(String),

    /// The id is well formed but no quiz has it.
    #[error("no quiz with id {0}")]
    NotFound(QuizId),

    /// The store rejected the quiz content.
    #[error("invalid quiz: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The store itself failed.
    #[error("store failure: {0}")]
    Store(String),

    /// The command name is not recognised.
    #[error("unknown command `{0}`, type `help` for the list of commands")]
    UnknownCommand(String),

    /// The prompter could not deliver an answer.
    #[error(transparent)]
    Input(#[from] PromptError),
}

impl CommandError {
    /// Returns `true` if the session cannot continue after this error.
    ///
    /// Only input failures are fatal; everything else is reported and the
    /// user gets the command prompt back.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CommandError::Input(_))
    }
}

impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => CommandError::NotFound(id),
            StoreError::Validation(messages) => CommandError::Validation(messages),
            StoreError::Unavailable(reason) => CommandError::Store(reason),
        }
    }
}
