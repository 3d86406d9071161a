//! Terminal console.

use colored::Colorize;

use quizzer_core::traits::Console;

/// Writes engine output to stdout and errors to stderr.
pub struct TerminalConsole;

impl Console for TerminalConsole {
    fn line(&self, text: &str) {
        println!(" {text}");
    }

    fn error(&self, text: &str) {
        eprintln!(" {} {}", "Error:".red().bold(), text.red());
    }

    fn headline(&self, text: &str) {
        println!(" {}", text.yellow().bold());
    }
}
