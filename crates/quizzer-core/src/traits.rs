//! Collaborator traits the session engine is written against.
//!
//! Stores are implemented in this crate ([`MemoryStore`](crate::store::MemoryStore))
//! and in `quizzer-store`; the terminal prompter and console live in
//! `quizzer-cli`.

use async_trait::async_trait;

use crate::error::{PromptError, StoreError};
use crate::model::{Quiz, QuizDraft, QuizId};

// ---------------------------------------------------------------------------
// Quiz store
// ---------------------------------------------------------------------------

/// CRUD access to the quiz collection.
#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Every quiz, in the store's iteration order.
    async fn list(&self) -> Result<Vec<Quiz>, StoreError>;

    /// A single quiz by id.
    async fn get(&self, id: QuizId) -> Result<Quiz, StoreError>;

    /// Save a new quiz and return it with its assigned id.
    async fn create(&self, draft: QuizDraft) -> Result<Quiz, StoreError>;

    /// Replace the content of an existing quiz.
    async fn update(&self, id: QuizId, draft: QuizDraft) -> Result<Quiz, StoreError>;

    /// Remove a quiz.
    async fn delete(&self, id: QuizId) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// Prompter
// ---------------------------------------------------------------------------

/// Line-oriented user input.
///
/// Taking `&mut self` keeps at most one question outstanding per prompter.
#[async_trait]
pub trait Prompter: Send {
    /// Show `prompt` and wait for one line of input.
    ///
    /// `initial` is existing text the user may want to edit; implementations
    /// that cannot pre-fill an input buffer may display it instead. The
    /// returned line is raw; use [`ask`] for the trimmed form.
    async fn ask(&mut self, prompt: &str, initial: Option<&str>) -> Result<String, PromptError>;
}

/// Ask a single question and return the trimmed answer.
pub async fn ask(
    prompter: &mut dyn Prompter,
    prompt: &str,
    initial: Option<&str>,
) -> Result<String, PromptError> {
    let line = prompter.ask(prompt, initial).await?;
    Ok(line.trim().to_string())
}

// ---------------------------------------------------------------------------
// Console
// ---------------------------------------------------------------------------

/// Where the engine writes its output.
pub trait Console: Send + Sync {
    /// A regular line of output.
    fn line(&self, text: &str);

    /// A failure the user should notice.
    fn error(&self, text: &str);

    /// A prominent line, such as a final score.
    fn headline(&self, text: &str) {
        self.line(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedPrompter;

    #[tokio::test]
    async fn ask_trims_the_answer() {
        let mut prompter = ScriptedPrompter::new(["  Rome \t"]);
        let answer = ask(&mut prompter, "Capital of Italy? ", None).await.unwrap();
        assert_eq!(answer, "Rome");
        assert_eq!(prompter.prompts(), ["Capital of Italy? "]);
    }

    #[tokio::test]
    async fn ask_passes_initial_text_through() {
        let mut prompter = ScriptedPrompter::new(["new"]);
        ask(&mut prompter, "Question: ", Some("old")).await.unwrap();
        assert_eq!(prompter.initials(), [Some("old".to_string())]);
    }

    #[tokio::test]
    async fn ask_reports_closed_input() {
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
        let err = ask(&mut prompter, "Question: ", None).await.unwrap_err();
        assert!(matches!(err, PromptError::Closed));
    }
}
