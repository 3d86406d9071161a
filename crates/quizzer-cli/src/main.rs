//! quizzer CLI — the interactive quiz trainer.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use quizzer_core::engine::SessionEngine;
use quizzer_store::{load_config_from, open_store, StoreConfig};

mod console;
mod prompter;

use console::TerminalConsole;
use prompter::LinePrompter;

#[derive(Parser)]
#[command(name = "quizzer", version, about = "Interactive quiz trainer")]
struct Cli {
    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Quiz store JSON file (overrides the config)
    #[arg(long, conflicts_with = "memory")]
    store: Option<PathBuf>,

    /// Keep quizzes in memory only, starting from the default set
    #[arg(long)]
    memory: bool,

    /// Seed for the play shuffle, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,

    /// Run a single command (e.g. "show 3") instead of the interactive prompt
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quizzer=warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut config = load_config_from(cli.config.as_deref())?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let seed_defaults = match &config.store {
        StoreConfig::Json { seed_defaults, .. } | StoreConfig::Memory { seed_defaults } => {
            *seed_defaults
        }
    };
    if cli.memory {
        config.store = StoreConfig::Memory { seed_defaults };
    } else if let Some(path) = cli.store {
        config.store = StoreConfig::Json {
            path,
            seed_defaults,
        };
    }
    tracing::debug!(store = ?config.store, "starting quizzer");

    let store = open_store(&config.store).await?;
    let mut engine = SessionEngine::new(store, Arc::new(TerminalConsole), config.engine_config());
    let mut prompter = LinePrompter::stdio();

    if cli.command.is_empty() {
        println!(" Type `help` for the list of commands.");
        engine.serve(&mut prompter, &config.prompt).await?;
        println!();
    } else {
        engine.dispatch(&cli.command.join(" "), &mut prompter).await?;
    }

    Ok(())
}
