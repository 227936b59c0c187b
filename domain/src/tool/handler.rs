//! Tool handler abstraction
//!
//! A [`ToolHandler`] is the host function bound to a [`ToolDefinition`] in the
//! registry. Handlers receive calls that have already been validated against
//! their definition.
//!
//! [`ToolDefinition`]: super::entities::ToolDefinition

use async_trait::async_trait;

use super::entities::ToolCall;
use super::value_objects::ToolError;

/// The callable behind a registered tool.
///
/// Return `Ok(text)` for anything the model should read as a normal result,
/// `Err(ToolError)` for failures. Failures are rendered back to the model with
/// an `Error:` prefix and never end the conversation.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn invoke(&self, call: &ToolCall) -> Result<String, ToolError>;
}
