//! quizzer-core — Interactive session engine, traits, and the play state machine.
//!
//! This crate defines the quiz data model, the collaborator traits the engine
//! talks to (store, prompter, console), and the command handlers that drive
//! every interactive dialog.

pub mod command;
pub mod engine;
pub mod error;
pub mod id;
pub mod model;
pub mod play;
pub mod store;
pub mod testing;
pub mod traits;
