//! Completion outcome: what one model round trip produced.
//!
//! A provider response is either a final answer or a list of tool calls to
//! run before asking again. When a provider returns both text and tool calls,
//! the tool calls win: the model is not done yet.

use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CompletionOutcome {
    /// The model is done; this text is the reply to the user.
    FinalAnswer { text: String },
    /// The model wants these tools run, in this order, before continuing.
    ToolCallsRequested { calls: Vec<ToolCall> },
}

impl CompletionOutcome {
    pub fn final_answer(text: impl Into<String>) -> Self {
        Self::FinalAnswer { text: text.into() }
    }

    pub fn tool_calls(calls: Vec<ToolCall>) -> Self {
        Self::ToolCallsRequested { calls }
    }

    /// Build an outcome from a provider's text and tool call list
    pub fn from_parts(text: Option<String>, calls: Vec<ToolCall>) -> Self {
        if calls.is_empty() {
            Self::final_answer(text.unwrap_or_default())
        } else {
            Self::tool_calls(calls)
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Self::FinalAnswer { .. })
    }
}
