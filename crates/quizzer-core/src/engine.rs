//! The interactive session engine.
//!
//! Runs one command at a time against a [`QuizStore`], asking the user
//! through a [`Prompter`] and writing results to a [`Console`]. Each
//! multi-step dialog is a straight-line `async fn` that suspends only while
//! waiting for an answer.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::command::{Command, HELP_LINES};
use crate::error::{CommandError, PromptError};
use crate::id::parse_id;
use crate::model::{Quiz, QuizDraft, QuizId};
use crate::play::{PlayOutcome, PlaySession, PlayState, RoundResult};
use crate::traits::{ask, Console, Prompter, QuizStore};

const QUESTION_PROMPT: &str = "Enter a question: ";
const ANSWER_PROMPT: &str = "Enter the answer: ";

/// Configuration for the session engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Lines printed by `credits`.
    pub credits: Vec<String>,
    /// Fixed seed for the play shuffle. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            credits: default_credits(),
            seed: None,
        }
    }
}

/// Credits shown when the configuration does not set its own.
pub fn default_credits() -> Vec<String> {
    vec![
        "quizzer, an interactive quiz trainer.".to_string(),
        "Written by the quizzer contributors.".to_string(),
    ]
}

/// Whether the prompt loop should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Result of answering a single quiz with `test`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// What a successfully completed command did.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Help,
    Listed(Vec<Quiz>),
    Shown(Quiz),
    Added(Quiz),
    Deleted(QuizId),
    Edited(Quiz),
    Tested(Verdict),
    Played(PlayOutcome),
    Credits,
    Quit,
}

/// The session engine.
pub struct SessionEngine {
    store: Arc<dyn QuizStore>,
    console: Arc<dyn Console>,
    rng: StdRng,
    config: EngineConfig,
}

impl SessionEngine {
    pub fn new(store: Arc<dyn QuizStore>, console: Arc<dyn Console>, config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            store,
            console,
            rng,
            config,
        }
    }

    /// Read and dispatch commands until `quit` or the end of input.
    pub async fn serve(
        &mut self,
        prompter: &mut dyn Prompter,
        prompt: &str,
    ) -> Result<(), CommandError> {
        loop {
            let line = match ask(prompter, prompt, None).await {
                Ok(line) => line,
                Err(PromptError::Closed) => {
                    tracing::debug!("input closed, leaving the prompt loop");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };

            match self.dispatch(&line, prompter).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => return Ok(()),
                Err(CommandError::Input(PromptError::Closed)) => {
                    tracing::debug!("input closed during a command");
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Run one command line, reporting any non-fatal failure to the console.
    ///
    /// Only fatal errors (see [`CommandError::is_fatal`]) are returned.
    pub async fn dispatch(
        &mut self,
        line: &str,
        prompter: &mut dyn Prompter,
    ) -> Result<Flow, CommandError> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        let result = match line.parse::<Command>() {
            Ok(command) => self.execute(command, prompter).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(CommandOutcome::Quit) => Ok(Flow::Quit),
            Ok(_) => Ok(Flow::Continue),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                match &e {
                    CommandError::Store(reason) => tracing::warn!("store failure: {reason}"),
                    other => tracing::debug!("command failed: {other}"),
                }
                self.console.error(&e.to_string());
                Ok(Flow::Continue)
            }
        }
    }

    /// Run a parsed command, returning its failure instead of reporting it.
    pub async fn execute(
        &mut self,
        command: Command,
        prompter: &mut dyn Prompter,
    ) -> Result<CommandOutcome, CommandError> {
        tracing::debug!(%command, "executing command");

        match command {
            Command::Help => {
                self.help();
                Ok(CommandOutcome::Help)
            }
            Command::List => self.list().await.map(CommandOutcome::Listed),
            Command::Show(raw) => self.show(raw.as_deref()).await.map(CommandOutcome::Shown),
            Command::Add => self.add(prompter).await.map(CommandOutcome::Added),
            Command::Delete(raw) => self
                .delete(raw.as_deref())
                .await
                .map(CommandOutcome::Deleted),
            Command::Edit(raw) => self
                .edit(raw.as_deref(), prompter)
                .await
                .map(CommandOutcome::Edited),
            Command::Test(raw) => self
                .test(raw.as_deref(), prompter)
                .await
                .map(CommandOutcome::Tested),
            Command::Play => self.play(prompter).await.map(CommandOutcome::Played),
            Command::Credits => {
                self.credits();
                Ok(CommandOutcome::Credits)
            }
            Command::Quit => Ok(CommandOutcome::Quit),
        }
    }

    pub fn help(&self) {
        for line in HELP_LINES {
            self.console.line(line);
        }
    }

    pub fn credits(&self) {
        for line in &self.config.credits {
            self.console.line(line);
        }
    }

    /// One line per quiz, in store order.
    pub async fn list(&self) -> Result<Vec<Quiz>, CommandError> {
        let quizzes = self.store.list().await?;
        for quiz in &quizzes {
            self.console.line(&format!("[{}]: {}", quiz.id, quiz.question));
        }
        Ok(quizzes)
    }

    pub async fn show(&self, raw_id: Option<&str>) -> Result<Quiz, CommandError> {
        let id = parse_id(raw_id)?;
        let quiz = self.store.get(id).await?;
        self.console.line(&quiz.to_string());
        Ok(quiz)
    }

    /// Ask for a question and an answer, then save them as a new quiz.
    ///
    /// Content is not checked here; the store decides what it accepts.
    pub async fn add(&self, prompter: &mut dyn Prompter) -> Result<Quiz, CommandError> {
        let question = ask(prompter, QUESTION_PROMPT, None).await?;
        let answer = ask(prompter, ANSWER_PROMPT, None).await?;

        let quiz = self.store.create(QuizDraft::new(question, answer)).await?;
        self.console.line(&format!(
            "Added [{}]: {} => {}",
            quiz.id, quiz.question, quiz.answer
        ));
        Ok(quiz)
    }

    pub async fn delete(&self, raw_id: Option<&str>) -> Result<QuizId, CommandError> {
        let id = parse_id(raw_id)?;
        self.store.delete(id).await?;
        self.console.line(&format!("Deleted quiz [{id}]."));
        Ok(id)
    }

    /// Re-ask both fields of an existing quiz, offering the current text.
    pub async fn edit(
        &self,
        raw_id: Option<&str>,
        prompter: &mut dyn Prompter,
    ) -> Result<Quiz, CommandError> {
        let id = parse_id(raw_id)?;
        let current = self.store.get(id).await?;

        let question = ask(prompter, QUESTION_PROMPT, Some(&current.question)).await?;
        let answer = ask(prompter, ANSWER_PROMPT, Some(&current.answer)).await?;

        let quiz = self
            .store
            .update(id, QuizDraft::new(question, answer))
            .await?;
        self.console.line(&format!(
            "Quiz [{}] changed to: {} => {}",
            quiz.id, quiz.question, quiz.answer
        ));
        Ok(quiz)
    }

    /// Ask a single quiz and report whether the answer was right.
    pub async fn test(
        &self,
        raw_id: Option<&str>,
        prompter: &mut dyn Prompter,
    ) -> Result<Verdict, CommandError> {
        let id = parse_id(raw_id)?;
        let quiz = self.store.get(id).await?;

        let response = ask(prompter, &format!("{}? ", quiz.question), None).await?;
        let verdict = if quiz.is_answered_by(&response) {
            self.console.line("Correct");
            Verdict::Correct
        } else {
            self.console.line("Incorrect");
            Verdict::Incorrect
        };
        Ok(verdict)
    }

    /// Ask every quiz once, in random order, until one is answered wrong.
    pub async fn play(&mut self, prompter: &mut dyn Prompter) -> Result<PlayOutcome, CommandError> {
        let quizzes = self.store.list().await?;
        let mut session = PlaySession::new(quizzes);
        tracing::debug!(total = session.total(), "play started");

        while let Some(quiz) = session.draw(&mut self.rng) {
            let response = ask(prompter, &format!("¿{}? ", quiz.question), None).await?;
            match session.answer(&quiz, &response) {
                RoundResult::Correct { score } => {
                    self.console.line(&format!("CORRECT — score now {score}"));
                }
                RoundResult::Incorrect { .. } => {
                    self.console.line("INCORRECT, game over.");
                }
            }
        }

        let outcome = session.outcome();
        tracing::debug!(score = outcome.score, state = ?outcome.state, "play finished");

        if outcome.state == PlayState::Won {
            self.console.line("No more questions to ask.");
        }
        self.console
            .headline(&format!("Final score: {}/{}", outcome.score, outcome.total));
        if outcome.state == PlayState::Won && outcome.total > 0 {
            self.console.headline("You won!");
        }
        Ok(outcome)
    }
}
