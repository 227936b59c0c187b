//! Azure OpenAI provider
//!
//! [`AzureOpenAiGateway`] implements [`LlmGateway`](blob_agent_application::LlmGateway)
//! against a chat completions deployment with native tool calling.

mod gateway;
pub mod types;

pub use gateway::{AzureOpenAiGateway, AzureOpenAiSettings};
