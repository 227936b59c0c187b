//! Infrastructure layer for blob-agent
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, the tool registry and built-in tools,
//! and configuration loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod storage;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, FileConfig, ValidatedConfig};
pub use logging::JsonlConversationLogger;
pub use providers::{AzureOpenAiGateway, AzureOpenAiSettings};
pub use storage::{AzureBlobSettings, AzureBlobStore, InMemoryBlobStore};
pub use tools::{
    JsonSchemaToolConverter, RegistryToolExecutor, ToolRegistry, register_blob_tools,
};
