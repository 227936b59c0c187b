//! LLM Gateway port
//!
//! Defines the interface for communicating with the model provider.
//! One call is one completion: the full transcript and the advertised tools
//! go out, a [`CompletionOutcome`] comes back.

use async_trait::async_trait;
use blob_agent_domain::{CompletionOutcome, ToolDefinition, TranscriptEntry};
use thiserror::Error;

/// Errors that can occur while talking to the model provider
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Provider returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,
}

/// Gateway for model completions
///
/// Implementations (adapters) live in the infrastructure layer. Requests are
/// side-effect free on the host, so callers may retry them.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Deployment or model identifier requests are sent to
    fn model(&self) -> &str;

    /// Request one completion for the given transcript and tool list
    async fn complete(
        &self,
        transcript: &[TranscriptEntry],
        tools: &[ToolDefinition],
    ) -> Result<CompletionOutcome, GatewayError>;
}
