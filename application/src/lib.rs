//! Application layer for blob-agent
//!
//! This crate contains the turn driver, port definitions, and execution
//! parameters. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    blob_store::{BlobStorePort, StorageError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway},
    progress::{NoTurnProgress, TurnProgressNotifier},
    tool_executor::ToolExecutorPort,
};
pub use use_cases::run_turn::{RunTurnError, RunTurnUseCase};
