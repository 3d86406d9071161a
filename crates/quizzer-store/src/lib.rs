//! quizzer-store — Persistent quiz storage and configuration.
//!
//! Implements the `QuizStore` trait over a JSON file and loads the
//! `quizzer.toml` configuration that picks a store backend.

pub mod config;
pub mod json;

pub use config::{load_config, load_config_from, open_store, QuizzerConfig, StoreConfig};
pub use json::JsonFileStore;
