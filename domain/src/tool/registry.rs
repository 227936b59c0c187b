//! Tool registry errors
//!
//! Both variants are setup-time programmer errors: a duplicate registration
//! or a lookup of a name nobody registered.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Duplicate tool name: {0}")]
    DuplicateToolName(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}
