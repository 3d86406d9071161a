//! Line prompter over async reader/writer pairs, normally stdin/stdout.

use std::io::IsTerminal;

use async_trait::async_trait;
use colored::Colorize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};

use quizzer_core::error::PromptError;
use quizzer_core::traits::Prompter;

/// Reads one line per question from `reader`, writing prompts to `writer`.
///
/// A plain line reader cannot pre-fill an editable buffer, so initial text is
/// printed as a hint above the prompt instead.
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
    color: bool,
}

impl<R, W> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            color: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

impl LinePrompter<BufReader<Stdin>, Stdout> {
    /// Prompter over the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .with_color(std::io::stdout().is_terminal())
    }
}

#[async_trait]
impl<R, W> Prompter for LinePrompter<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn ask(&mut self, prompt: &str, initial: Option<&str>) -> Result<String, PromptError> {
        if let Some(initial) = initial {
            let hint = format!("  (current: {initial})\n");
            self.writer.write_all(hint.as_bytes()).await?;
        }

        let prompt = if self.color {
            prompt.red().to_string()
        } else {
            prompt.to_string()
        };
        self.writer.write_all(prompt.as_bytes()).await?;
        self.writer.flush().await?;

        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
