//! Command line parsing for the interactive prompt.

use std::fmt;
use std::str::FromStr;

use crate::error::CommandError;

/// A command typed at the prompt.
///
/// Id arguments are kept raw; each handler validates its own with
/// [`parse_id`](crate::id::parse_id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    Show(Option<String>),
    Add,
    Delete(Option<String>),
    Edit(Option<String>),
    Test(Option<String>),
    Play,
    Credits,
    Quit,
}

impl Command {
    /// Canonical name, as listed by `help`.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::List => "list",
            Command::Show(_) => "show",
            Command::Add => "add",
            Command::Delete(_) => "delete",
            Command::Edit(_) => "edit",
            Command::Test(_) => "test",
            Command::Play => "play",
            Command::Credits => "credits",
            Command::Quit => "quit",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Show(Some(id))
            | Command::Delete(Some(id))
            | Command::Edit(Some(id))
            | Command::Test(Some(id)) => write!(f, "{} {id}", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    /// Parse one input line. The command word is case-insensitive; only the
    /// first argument is kept.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();
        let arg = words.next().map(str::to_string);

        match name.to_lowercase().as_str() {
            "h" | "help" => Ok(Command::Help),
            "list" => Ok(Command::List),
            "show" => Ok(Command::Show(arg)),
            "add" => Ok(Command::Add),
            "delete" => Ok(Command::Delete(arg)),
            "edit" => Ok(Command::Edit(arg)),
            "test" => Ok(Command::Test(arg)),
            "p" | "play" => Ok(Command::Play),
            "credits" => Ok(Command::Credits),
            "q" | "quit" => Ok(Command::Quit),
            _ => Err(CommandError::UnknownCommand(name.to_string())),
        }
    }
}

/// Help text, one line per command.
pub const HELP_LINES: &[&str] = &[
    "Commands:",
    "  h|help - Show this help.",
    "  list - List the existing quizzes.",
    "  show <id> - Show the question and answer of a quiz.",
    "  add - Add a new quiz interactively.",
    "  delete <id> - Delete a quiz.",
    "  edit <id> - Edit a quiz.",
    "  test <id> - Answer a single quiz.",
    "  p|play - Answer every quiz in random order.",
    "  credits - Credits.",
    "  q|quit - Quit the program.",
];
