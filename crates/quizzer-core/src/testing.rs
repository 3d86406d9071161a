//! Test doubles for the prompter and console.
//!
//! Exported so downstream crates can drive the engine without a terminal.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::PromptError;
use crate::traits::{Console, Prompter};

/// A prompter that answers from a fixed script.
///
/// Every prompt and initial value it receives is recorded. Once the script
/// runs out it behaves like closed input.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    replies: VecDeque<String>,
    prompts: Vec<String>,
    initials: Vec<Option<String>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            initials: Vec::new(),
        }
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Initial values offered with each prompt.
    pub fn initials(&self) -> &[Option<String>] {
        &self.initials
    }

    /// Replies not consumed yet.
    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn ask(&mut self, prompt: &str, initial: Option<&str>) -> Result<String, PromptError> {
        self.prompts.push(prompt.to_string());
        self.initials.push(initial.map(str::to_string));
        self.replies.pop_front().ok_or(PromptError::Closed)
    }
}

/// Which [`Console`] method produced a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Line,
    Error,
    Headline,
}

/// A console that keeps everything written to it.
#[derive(Debug, Default)]
pub struct RecordingConsole {
    lines: Mutex<Vec<(LineKind, String)>>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every line written, with its kind.
    pub fn entries(&self) -> Vec<(LineKind, String)> {
        self.lines.lock().unwrap().clone()
    }

    /// Lines of the given kind.
    pub fn of_kind(&self, kind: LineKind) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, text)| text)
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.of_kind(LineKind::Error)
    }

    /// Whether any line of any kind contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries().iter().any(|(_, text)| text.contains(needle))
    }

    pub fn clear(&self) {
        self.lines.lock().unwrap().clear();
    }

    fn push(&self, kind: LineKind, text: &str) {
        self.lines.lock().unwrap().push((kind, text.to_string()));
    }
}

impl Console for RecordingConsole {
    fn line(&self, text: &str) {
        self.push(LineKind::Line, text);
    }

    fn error(&self, text: &str) {
        self.push(LineKind::Error, text);
    }

    fn headline(&self, text: &str) {
        self.push(LineKind::Headline, text);
    }
}
