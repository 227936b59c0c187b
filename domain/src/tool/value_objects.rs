//! Tool domain value objects: immutable result and error types
//!
//! Every execution yields a [`ToolResult`]. Whatever happened, the model only
//! ever sees text: [`ToolResult::observation`] renders successes verbatim and
//! failures with an `Error:` prefix, so a failing tool never aborts the
//! conversation.

use super::entities::ToolCall;
use serde::{Deserialize, Serialize};

/// Error that occurred while resolving, validating or running a tool.
///
/// | Code | Description |
/// |------|-------------|
/// | `UNKNOWN_TOOL` | No tool registered under the requested name |
/// | `INVALID_ARGUMENTS` | Arguments do not match the declared schema |
/// | `NOT_FOUND` | A resource the tool needed does not exist |
/// | `EXECUTION_FAILED` | The tool body failed (I/O, parse error, panic) |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "NOT_FOUND", "INVALID_ARGUMENTS")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::new("UNKNOWN_TOOL", format!("Unknown tool: {}", name.into()))
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENTS", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new("EXECUTION_FAILED", message)
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ToolError {}

/// Result of a tool execution.
///
/// Echoes the originating call so the transcript can correlate it, and carries
/// either the tool's text output or the error that replaced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// The call this result answers
    pub call: ToolCall,
    /// Output content (for successful execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Error information (for failed execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    /// Duration of execution in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(call: &ToolCall, output: impl Into<String>) -> Self {
        Self {
            call: call.clone(),
            output: Some(output.into()),
            error: None,
            duration_ms: None,
        }
    }

    /// Create a failed result
    pub fn failure(call: &ToolCall, error: ToolError) -> Self {
        Self {
            call: call.clone(),
            output: None,
            error: Some(error),
            duration_ms: None,
        }
    }

    /// Add duration metadata
    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn tool_name(&self) -> &str {
        &self.call.tool_name
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    /// The text handed back to the model.
    ///
    /// Failures always start with `Error:`. Output that already carries the
    /// prefix (tools that report their own errors) is not prefixed twice.
    pub fn observation(&self) -> String {
        match (&self.error, &self.output) {
            (Some(error), _) if error.message.starts_with("Error:") => error.message.clone(),
            (Some(error), _) => format!("Error: {}", error.message),
            (None, Some(output)) => output.clone(),
            (None, None) => String::new(),
        }
    }
}
