//! Blob store port
//!
//! The two read-only storage operations the built-in tools need. Both are
//! idempotent: reading the same blob twice returns the same bytes unless
//! someone else changed it in between.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the storage backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Blob '{name}' does not exist in container '{container}'.")]
    NotFound { container: String, name: String },

    #[error("Container '{0}' does not exist.")]
    ContainerNotFound(String),

    #[error("Storage authentication failed: {0}")]
    Authentication(String),

    #[error("Storage request failed: {0}")]
    RequestFailed(String),

    #[error("Storage returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Invalid storage response: {0}")]
    InvalidResponse(String),
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

/// Port for read-only blob access
#[async_trait]
pub trait BlobStorePort: Send + Sync {
    /// Names of all blobs in a container. An empty container is `Ok(vec![])`.
    async fn list_objects(&self, container: &str) -> Result<Vec<String>, StorageError>;

    /// Full contents of a blob. Fails with [`StorageError::NotFound`] when absent.
    async fn read_object(&self, container: &str, name: &str) -> Result<Vec<u8>, StorageError>;
}
