//! Model provider adapters

pub mod azure_openai;

pub use azure_openai::{AzureOpenAiGateway, AzureOpenAiSettings};
