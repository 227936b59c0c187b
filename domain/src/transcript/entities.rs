//! Transcript entries

use crate::tool::entities::ToolCall;
use crate::tool::value_objects::ToolResult;
use serde::{Deserialize, Serialize};

/// Wire role an entry is sent under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }
}

/// One turn of the dialogue.
///
/// Entries are never edited once appended. `ToolCalls` records the assistant
/// turn that requested tools and always precedes the `ToolResult` entries
/// answering it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TranscriptEntry {
    System { content: String },
    User { content: String },
    Assistant { content: String },
    ToolCalls { calls: Vec<ToolCall> },
    ToolResult {
        /// Provider call ID this result answers (if the provider assigned one)
        call_id: Option<String>,
        tool_name: String,
        content: String,
    },
}

impl TranscriptEntry {
    pub fn system(content: impl Into<String>) -> Self {
        Self::System {
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::User {
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant {
            content: content.into(),
        }
    }

    pub fn tool_calls(calls: Vec<ToolCall>) -> Self {
        Self::ToolCalls { calls }
    }

    /// Record a tool result as the observation text the model will read
    pub fn tool_result(result: &ToolResult) -> Self {
        Self::ToolResult {
            call_id: result.call.id.clone(),
            tool_name: result.call.tool_name.clone(),
            content: result.observation(),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Self::System { .. } => Role::System,
            Self::User { .. } => Role::User,
            Self::Assistant { .. } | Self::ToolCalls { .. } => Role::Assistant,
            Self::ToolResult { .. } => Role::Tool,
        }
    }

    /// Text content, if this entry carries any
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::System { content }
            | Self::User { content }
            | Self::Assistant { content }
            | Self::ToolResult { content, .. } => Some(content),
            Self::ToolCalls { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::value_objects::ToolError;

    #[test]
    fn test_roles() {
        assert_eq!(TranscriptEntry::system("s").role(), Role::System);
        assert_eq!(TranscriptEntry::user("u").role(), Role::User);
        assert_eq!(TranscriptEntry::assistant("a").role(), Role::Assistant);
        assert_eq!(TranscriptEntry::tool_calls(vec![]).role(), Role::Assistant);
        assert_eq!(Role::Tool.as_str(), "tool");
    }

    #[test]
    fn test_tool_result_entry_uses_observation() {
        let call = ToolCall::new("read_csv_blob").with_id("call_7");
        let result = ToolResult::failure(&call, ToolError::execution_failed("boom"));

        let entry = TranscriptEntry::tool_result(&result);
        match &entry {
            TranscriptEntry::ToolResult {
                call_id,
                tool_name,
                content,
            } => {
                assert_eq!(call_id.as_deref(), Some("call_7"));
                assert_eq!(tool_name, "read_csv_blob");
                assert_eq!(content, "Error: boom");
            }
            other => panic!("unexpected entry: {:?}", other),
        }
        assert_eq!(entry.content(), Some("Error: boom"));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(TranscriptEntry::user("hi")).unwrap();
        assert_eq!(json["kind"], "user");
        assert_eq!(json["content"], "hi");
    }
}
