//! Wire types for the Azure OpenAI chat completions API
//!
//! Converts the domain transcript to chat messages and the first response
//! choice back to a [`CompletionOutcome`].

use blob_agent_application::GatewayError;
use blob_agent_domain::tool::entities::RAW_ARGUMENTS_KEY;
use blob_agent_domain::{CompletionOutcome, ToolCall, TranscriptEntry, truncate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─── Wire format ─────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<WireToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireToolCall {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default = "function_kind")]
    pub kind: String,
    pub function: WireFunction,
}

fn function_kind() -> String {
    "function".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireFunction {
    pub name: String,
    /// JSON-encoded argument object
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<Value>,
}

// ─── Domain → Wire ───────────────────────────────────────────────

impl ChatMessage {
    fn text(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content.to_string()),
            tool_calls: None,
            tool_call_id: None,
        }
    }
}

/// Arguments as sent back to the provider; unparsable originals go back verbatim
fn wire_arguments(call: &ToolCall) -> String {
    match call.get_string(RAW_ARGUMENTS_KEY) {
        Some(raw) if call.arguments.len() == 1 => raw.to_string(),
        _ => call.arguments_json(),
    }
}

fn to_wire_tool_call(call: &ToolCall) -> WireToolCall {
    WireToolCall {
        id: call.id.clone().unwrap_or_default(),
        kind: function_kind(),
        function: WireFunction {
            name: call.tool_name.clone(),
            arguments: wire_arguments(call),
        },
    }
}

/// Render the transcript as chat messages, one per entry
pub fn to_wire_messages(entries: &[TranscriptEntry]) -> Vec<ChatMessage> {
    entries
        .iter()
        .map(|entry| match entry {
            TranscriptEntry::System { content } => ChatMessage::text("system", content),
            TranscriptEntry::User { content } => ChatMessage::text("user", content),
            TranscriptEntry::Assistant { content } => ChatMessage::text("assistant", content),
            TranscriptEntry::ToolCalls { calls } => ChatMessage {
                role: "assistant".to_string(),
                content: None,
                tool_calls: Some(calls.iter().map(to_wire_tool_call).collect()),
                tool_call_id: None,
            },
            TranscriptEntry::ToolResult {
                call_id, content, ..
            } => ChatMessage {
                role: "tool".to_string(),
                content: Some(content.clone()),
                tool_calls: None,
                tool_call_id: Some(call_id.clone().unwrap_or_default()),
            },
        })
        .collect()
}

// ─── Wire → Domain ───────────────────────────────────────────────

/// Convert the first choice to a [`CompletionOutcome`].
///
/// Tool calls keep provider order. Calls without an ID get a positional one
/// so their results can still be correlated.
pub fn parse_completion(response: ChatResponse) -> Result<CompletionOutcome, GatewayError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::InvalidResponse("response contained no choices".into()))?;

    let calls = choice
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, wire)| {
            let id = if wire.id.is_empty() {
                format!("call_{}", i)
            } else {
                wire.id
            };
            ToolCall::from_json_arguments(id, wire.function.name, &wire.function.arguments)
        })
        .collect();

    Ok(CompletionOutcome::from_parts(choice.message.content, calls))
}

/// Human-readable message from an error response body
pub fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody {
            error: ApiErrorDetail {
                message: Some(message),
                ..
            },
        }) => message,
        Ok(ApiErrorBody {
            error: ApiErrorDetail {
                code: Some(code), ..
            },
        }) => format!("error code {}", code),
        _ if body.trim().is_empty() => "no error details".to_string(),
        _ => truncate(body.trim(), 200),
    }
}
