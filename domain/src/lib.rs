//! Domain layer for blob-agent
//!
//! This crate contains the core types of the tool-invocation contract:
//! what a tool looks like, how the model asks for one, what comes back,
//! and the transcript those observations are folded into.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Tool**: a host function advertised to the model by a [`ToolDefinition`]
//!   and invoked through a [`ToolHandler`]
//! - **Transcript**: the append-only dialogue replayed to the model on
//!   every request
//! - **Completion**: one model round trip, yielding a [`CompletionOutcome`]

pub mod completion;
pub mod core;
pub mod tool;
pub mod transcript;

// Re-export commonly used types
pub use completion::CompletionOutcome;
pub use core::string::truncate;
pub use tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    handler::ToolHandler,
    registry::RegistryError,
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};
pub use transcript::{DEFAULT_SYSTEM_PROMPT, Role, Transcript, TranscriptEntry};
