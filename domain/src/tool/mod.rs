//! Tool domain module
//!
//! This module defines the contract between a conversational model and the
//! host functions it may call.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ToolDefinition│───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (advertised) │    │ (requested)  │    │ (observed)   │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ToolDefinition`]: name, description, parameter schema and return
//!   description of a single tool
//! - [`ToolHandler`]: the bound callable behind a definition
//! - [`ToolCall`]: an invocation request chosen by the model
//! - [`ToolResult`]: the outcome, always renderable as plain text via
//!   [`ToolResult::observation`]
//! - [`ToolValidator`]: pure argument validation before invocation
//! - [`RegistryError`]: registry setup and lookup failures
//!
//! # Architecture
//!
//! - **Domain** (this module): pure definitions, no I/O
//! - **Application** (`ToolExecutorPort`): port trait for tool execution
//! - **Infrastructure** (`ToolRegistry`, `RegistryToolExecutor`): concrete
//!   registration, dispatch and the built-in blob tools

pub mod entities;
pub mod handler;
pub mod registry;
pub mod traits;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolParameter};
pub use handler::ToolHandler;
pub use registry::RegistryError;
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolResult};
