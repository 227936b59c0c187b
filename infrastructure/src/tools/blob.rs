//! Built-in blob storage tools: `list_blobs` and `read_csv_blob`
//!
//! Both tools are bound to one container at registration time. Storage
//! failures come back as [`ToolError`]s, which the executor renders as
//! `Error:` observations for the model.

use std::sync::Arc;

use async_trait::async_trait;
use blob_agent_application::{BlobStorePort, StorageError};
use blob_agent_domain::{
    RegistryError, ToolCall, ToolDefinition, ToolError, ToolHandler, ToolParameter,
};
use tracing::info;

use super::csv_preview::{PREVIEW_ROWS, render_csv_preview};
use super::registry::ToolRegistry;

/// Tool name constants
pub const LIST_BLOBS: &str = "list_blobs";
pub const READ_CSV_BLOB: &str = "read_csv_blob";

/// Get the tool definition for list_blobs
pub fn list_blobs_definition() -> ToolDefinition {
    ToolDefinition::new(LIST_BLOBS, "Lists all blobs in the configured container.")
        .with_returns("A list of blob names in the container.")
}

/// Get the tool definition for read_csv_blob
pub fn read_csv_blob_definition() -> ToolDefinition {
    ToolDefinition::new(
        READ_CSV_BLOB,
        "Reads the content of a CSV file from Azure Blob Storage and returns a preview.",
    )
    .with_parameter(ToolParameter::new(
        "blob_name",
        "The name of the blob file to read (e.g., 'csv-data/sales_data.csv').",
        true,
    ))
    .with_returns("A string representation of the first few rows of the CSV file.")
}

/// Register both blob tools against `container`, list first
pub fn register_blob_tools(
    registry: &mut ToolRegistry,
    store: Arc<dyn BlobStorePort>,
    container: impl Into<String>,
) -> Result<(), RegistryError> {
    let container = container.into();
    registry.register(
        list_blobs_definition(),
        Arc::new(ListBlobsTool::new(store.clone(), container.clone())),
    )?;
    registry.register(
        read_csv_blob_definition(),
        Arc::new(ReadCsvBlobTool::new(store, container)),
    )
}

/// `list_blobs()`: comma-joined blob names
pub struct ListBlobsTool {
    store: Arc<dyn BlobStorePort>,
    container: String,
}

impl ListBlobsTool {
    pub fn new(store: Arc<dyn BlobStorePort>, container: impl Into<String>) -> Self {
        Self {
            store,
            container: container.into(),
        }
    }
}

#[async_trait]
impl ToolHandler for ListBlobsTool {
    async fn invoke(&self, _call: &ToolCall) -> Result<String, ToolError> {
        let names = self
            .store
            .list_objects(&self.container)
            .await
            .map_err(|e| ToolError::execution_failed(format!("Failed to list blobs: {}", e)))?;

        if names.is_empty() {
            Ok("No blobs found.".to_string())
        } else {
            Ok(names.join(", "))
        }
    }
}

/// `read_csv_blob(blob_name)`: markdown preview of the first rows
pub struct ReadCsvBlobTool {
    store: Arc<dyn BlobStorePort>,
    container: String,
}

impl ReadCsvBlobTool {
    pub fn new(store: Arc<dyn BlobStorePort>, container: impl Into<String>) -> Self {
        Self {
            store,
            container: container.into(),
        }
    }
}

#[async_trait]
impl ToolHandler for ReadCsvBlobTool {
    async fn invoke(&self, call: &ToolCall) -> Result<String, ToolError> {
        let blob_name = call
            .require_string("blob_name")
            .map_err(ToolError::invalid_arguments)?;
        if blob_name.trim().is_empty() {
            return Err(ToolError::invalid_arguments("blob_name must not be empty"));
        }

        info!(blob = blob_name, container = %self.container, "Downloading blob");
        let bytes = self
            .store
            .read_object(&self.container, blob_name)
            .await
            .map_err(|e| match e {
                StorageError::NotFound { .. } => ToolError::not_found(format!(
                    "Blob '{}' does not exist in container '{}'.",
                    blob_name, self.container
                )),
                other => ToolError::execution_failed(format!(
                    "Failed to read blob '{}': {}",
                    blob_name, other
                )),
            })?;

        render_csv_preview(&bytes, PREVIEW_ROWS).map_err(|e| {
            ToolError::execution_failed(format!("Failed to read blob '{}': {}", blob_name, e))
        })
    }
}
