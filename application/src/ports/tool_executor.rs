//! Tool Executor port
//!
//! Defines the interface for resolving and running tools chosen by the model.

use async_trait::async_trait;
use blob_agent_domain::{ToolCall, ToolDefinition, ToolResult};

/// Port for tool execution
///
/// This port defines how the application layer executes tools.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Definitions of all available tools, in registration order
    fn definitions(&self) -> Vec<ToolDefinition>;

    /// Execute a tool call.
    ///
    /// Never fails: unknown tools, invalid arguments and tool failures all
    /// come back as a failed [`ToolResult`].
    async fn execute(&self, call: &ToolCall) -> ToolResult;
}
