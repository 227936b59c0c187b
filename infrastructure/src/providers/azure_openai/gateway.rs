//! Azure OpenAI chat completions gateway

use std::time::Duration;

use async_trait::async_trait;
use blob_agent_application::{GatewayError, LlmGateway};
use blob_agent_domain::{CompletionOutcome, ToolDefinition, TranscriptEntry};
use reqwest::Url;
use tracing::{debug, warn};

use super::types::{ChatRequest, ChatResponse, api_error_message, parse_completion, to_wire_messages};
use crate::tools::JsonSchemaToolConverter;

/// Connection settings for one chat deployment
#[derive(Clone)]
pub struct AzureOpenAiSettings {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`
    pub endpoint: String,
    pub deployment: String,
    pub api_key: String,
    pub api_version: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for AzureOpenAiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureOpenAiSettings")
            .field("endpoint", &self.endpoint)
            .field("deployment", &self.deployment)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AzureOpenAiSettings {
    /// `{endpoint}/openai/deployments/{deployment}/chat/completions?api-version={version}`
    pub fn completions_url(&self) -> Result<Url, GatewayError> {
        let mut url = Url::parse(&self.endpoint).map_err(|e| {
            GatewayError::RequestFailed(format!("invalid endpoint '{}': {}", self.endpoint, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                GatewayError::RequestFailed(format!("invalid endpoint '{}'", self.endpoint))
            })?
            .pop_if_empty()
            .extend([
                "openai",
                "deployments",
                self.deployment.as_str(),
                "chat",
                "completions",
            ]);
        url.query_pairs_mut()
            .append_pair("api-version", &self.api_version);
        Ok(url)
    }
}

/// [`LlmGateway`] for an Azure OpenAI deployment
pub struct AzureOpenAiGateway {
    client: reqwest::Client,
    url: Url,
    settings: AzureOpenAiSettings,
    converter: JsonSchemaToolConverter,
}

impl AzureOpenAiGateway {
    pub fn new(settings: AzureOpenAiSettings) -> Result<Self, GatewayError> {
        let url = settings.completions_url()?;
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            url,
            settings,
            converter: JsonSchemaToolConverter,
        })
    }

    /// Request body for one completion; `tool_choice` only when tools exist
    pub fn build_request(
        &self,
        transcript: &[TranscriptEntry],
        tools: &[ToolDefinition],
    ) -> ChatRequest {
        ChatRequest {
            messages: to_wire_messages(transcript),
            tools: self.converter.tools_schema(tools),
            tool_choice: (!tools.is_empty()).then_some("auto"),
        }
    }
}

fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::ConnectionError(e.to_string())
    }
}

#[async_trait]
impl LlmGateway for AzureOpenAiGateway {
    fn model(&self) -> &str {
        &self.settings.deployment
    }

    async fn complete(
        &self,
        transcript: &[TranscriptEntry],
        tools: &[ToolDefinition],
    ) -> Result<CompletionOutcome, GatewayError> {
        let request = self.build_request(transcript, tools);
        debug!(
            deployment = %self.settings.deployment,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.url.clone())
            .header("api-key", &self.settings.api_key)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = api_error_message(&body);
            warn!(status = status.as_u16(), %message, "Chat completion failed");
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        let outcome = parse_completion(body)?;
        debug!(is_final = outcome.is_final(), "Chat completion received");
        Ok(outcome)
    }
}
