//! Tool Registry
//!
//! The [`ToolRegistry`] maps tool names to their definition and bound
//! [`ToolHandler`]. It is filled once at startup and read-only afterwards,
//! so it can be shared behind an `Arc` by any number of conversations.
//!
//! # Usage
//!
//! ```ignore
//! use blob_agent_infrastructure::tools::{ToolRegistry, register_blob_tools};
//!
//! let mut registry = ToolRegistry::new();
//! register_blob_tools(&mut registry, store, "my-container")?;
//!
//! // Advertised to the model on every request, in registration order
//! let names: Vec<&str> = registry.list().map(|d| d.name.as_str()).collect();
//! assert_eq!(names, ["list_blobs", "read_csv_blob"]);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use blob_agent_domain::{RegistryError, ToolDefinition, ToolHandler};
use tracing::debug;

/// A definition together with the callable that implements it
pub struct RegisteredTool {
    definition: ToolDefinition,
    handler: Arc<dyn ToolHandler>,
}

impl RegisteredTool {
    pub fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    pub fn handler(&self) -> &Arc<dyn ToolHandler> {
        &self.handler
    }
}

/// Name-unique collection of tools
///
/// Storage keeps registration order for advertising; the index gives O(1)
/// lookup by name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool.
    ///
    /// Fails with [`RegistryError::DuplicateToolName`] if the name is taken;
    /// the existing registration stays active.
    pub fn register(
        &mut self,
        definition: ToolDefinition,
        handler: Arc<dyn ToolHandler>,
    ) -> Result<(), RegistryError> {
        if self.index.contains_key(&definition.name) {
            return Err(RegistryError::DuplicateToolName(definition.name));
        }

        debug!(tool = %definition.name, "Registered tool");
        self.index.insert(definition.name.clone(), self.tools.len());
        self.tools.push(RegisteredTool {
            definition,
            handler,
        });
        Ok(())
    }

    /// All definitions in registration order.
    ///
    /// Each call starts a fresh iteration.
    pub fn list(&self) -> impl Iterator<Item = &ToolDefinition> + '_ {
        self.tools.iter().map(|t| &t.definition)
    }

    /// Look up a tool by name
    pub fn resolve(&self, name: &str) -> Result<&RegisteredTool, RegistryError> {
        self.index
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| RegistryError::UnknownTool(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use blob_agent_domain::{ToolCall, ToolError};

    struct Fixed(&'static str);

    #[async_trait]
    impl ToolHandler for Fixed {
        async fn invoke(&self, _call: &ToolCall) -> Result<String, ToolError> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn test_duplicate_keeps_first() {
        let mut registry = ToolRegistry::new();
        registry
            .register(ToolDefinition::new("list_blobs", "first"), Arc::new(Fixed("one")))
            .unwrap();

        let err = registry
            .register(ToolDefinition::new("list_blobs", "second"), Arc::new(Fixed("two")))
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateToolName("list_blobs".to_string()));
        assert_eq!(registry.len(), 1);

        let tool = registry.resolve("list_blobs").unwrap();
        assert_eq!(tool.definition().description, "first");
        let out = tool.handler().invoke(&ToolCall::new("list_blobs")).await;
        assert_eq!(out.unwrap(), "one");
    }

    #[test]
    fn test_list_is_ordered_and_restartable() {
        let mut registry = ToolRegistry::new();
        for name in ["list_blobs", "read_csv_blob", "another"] {
            registry
                .register(ToolDefinition::new(name, ""), Arc::new(Fixed("")))
                .unwrap();
        }

        let first: Vec<&str> = registry.list().map(|d| d.name.as_str()).collect();
        let second: Vec<&str> = registry.list().map(|d| d.name.as_str()).collect();
        assert_eq!(first, vec!["list_blobs", "read_csv_blob", "another"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_unknown() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.contains("drop_table"));
        assert!(matches!(
            registry.resolve("drop_table"),
            Err(RegistryError::UnknownTool(name)) if name == "drop_table"
        ));
    }
}
