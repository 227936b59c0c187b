//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface for blob-agent.

mod repl;

pub use repl::{ChatRepl, is_exit_command};
