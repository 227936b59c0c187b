//! Registry-backed implementation of [`ToolExecutorPort`].
//!
//! # Execution Path
//!
//! ```text
//! execute(call)
//!   ├─ resolve(name)      → UNKNOWN_TOOL on miss
//!   ├─ validate(args)     → INVALID_ARGUMENTS, handler not invoked
//!   └─ handler.invoke()   → Ok(text) | Err(ToolError) | panic → EXECUTION_FAILED
//! ```
//!
//! Nothing raised inside a tool escapes this module; every outcome is a
//! [`ToolResult`].

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use blob_agent_application::ToolExecutorPort;
use blob_agent_domain::{
    DefaultToolValidator, ToolCall, ToolDefinition, ToolError, ToolResult, ToolValidator,
};
use futures::FutureExt;
use tracing::{debug, warn};

use super::registry::ToolRegistry;

/// Executor that dispatches calls through a shared [`ToolRegistry`]
#[derive(Clone)]
pub struct RegistryToolExecutor {
    registry: Arc<ToolRegistry>,
    validator: DefaultToolValidator,
}

impl RegistryToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            validator: DefaultToolValidator,
        }
    }

    async fn execute_internal(&self, call: &ToolCall) -> ToolResult {
        let tool = match self.registry.resolve(&call.tool_name) {
            Ok(tool) => tool,
            Err(_) => return ToolResult::failure(call, ToolError::unknown_tool(&call.tool_name)),
        };

        if let Err(message) = self.validator.validate(call, tool.definition()) {
            return ToolResult::failure(call, ToolError::invalid_arguments(message));
        }

        match AssertUnwindSafe(tool.handler().invoke(call))
            .catch_unwind()
            .await
        {
            Ok(Ok(output)) => ToolResult::success(call, output),
            Ok(Err(error)) => ToolResult::failure(call, error),
            Err(panic) => ToolResult::failure(
                call,
                ToolError::execution_failed(format!(
                    "Tool '{}' panicked: {}",
                    call.tool_name,
                    panic_message(panic.as_ref())
                )),
            ),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}

#[async_trait]
impl ToolExecutorPort for RegistryToolExecutor {
    fn definitions(&self) -> Vec<ToolDefinition> {
        self.registry.list().cloned().collect()
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let start = Instant::now();
        let result = self.execute_internal(call).await;
        let duration_ms = start.elapsed().as_millis() as u64;
        let result = result.with_duration(duration_ms);

        match result.error() {
            None => debug!(
                tool = %call.tool_name,
                duration_ms,
                "Tool executed"
            ),
            Some(error) => warn!(
                tool = %call.tool_name,
                duration_ms,
                %error,
                "Tool failed"
            ),
        }
        result
    }
}
