//! In-memory blob store for offline use and tests

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use blob_agent_application::{BlobStorePort, StorageError};

/// Containers of named blobs held in process memory.
///
/// Listings come back sorted by name, as the Blob service returns them.
#[derive(Default)]
pub struct InMemoryBlobStore {
    containers: RwLock<Containers>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty container (no-op if it exists)
    pub fn create_container(&self, container: &str) {
        self.write().entry(container.to_string()).or_default();
    }

    /// Store a blob, creating the container if needed
    pub fn put(&self, container: &str, name: impl Into<String>, data: Vec<u8>) {
        self.write()
            .entry(container.to_string())
            .or_default()
            .insert(name.into(), data);
    }

    /// Builder form of [`put`](Self::put)
    pub fn with_blob(
        self,
        container: &str,
        name: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        self.put(container, name, data.into());
        self
    }
}

type Containers = HashMap<String, BTreeMap<String, Vec<u8>>>;

// Every write is a single map operation, so a poisoned map is still consistent.
impl InMemoryBlobStore {
    fn read(&self) -> RwLockReadGuard<'_, Containers> {
        self.containers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Containers> {
        self.containers.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl BlobStorePort for InMemoryBlobStore {
    async fn list_objects(&self, container: &str) -> Result<Vec<String>, StorageError> {
        let containers = self.read();
        containers
            .get(container)
            .map(|blobs| blobs.keys().cloned().collect())
            .ok_or_else(|| StorageError::ContainerNotFound(container.to_string()))
    }

    async fn read_object(&self, container: &str, name: &str) -> Result<Vec<u8>, StorageError> {
        let containers = self.read();
        containers
            .get(container)
            .and_then(|blobs| blobs.get(name))
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                container: container.to_string(),
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_sorted() {
        let store = InMemoryBlobStore::new()
            .with_blob("data", "b.csv", "2")
            .with_blob("data", "a.csv", "1");
        assert_eq!(store.list_objects("data").await.unwrap(), vec!["a.csv", "b.csv"]);
    }

    #[tokio::test]
    async fn test_empty_container_lists_nothing() {
        let store = InMemoryBlobStore::new();
        store.create_container("data");
        assert!(store.list_objects("data").await.unwrap().is_empty());
        assert!(matches!(
            store.list_objects("other").await,
            Err(StorageError::ContainerNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_repeated_reads_are_identical() {
        let store = InMemoryBlobStore::new().with_blob("data", "a.csv", "x,y\n1,2\n");
        let first = store.read_object("data", "a.csv").await.unwrap();
        let second = store.read_object("data", "a.csv").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_missing_blob() {
        let store = InMemoryBlobStore::new().with_blob("data", "a.csv", "");
        let err = store.read_object("data", "missing.csv").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("does not exist"));
    }

    #[tokio::test]
    async fn test_writes_and_reads_survive_poisoned_lock() {
        let store = InMemoryBlobStore::new().with_blob("data", "a.csv", "1");
        let poison = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.containers.write().unwrap();
            panic!("writer died");
        }));
        assert!(poison.is_err());
        assert!(store.containers.is_poisoned());

        store.put("data", "b.csv", b"2".to_vec());
        store.create_container("empty");

        assert_eq!(store.list_objects("data").await.unwrap(), vec!["a.csv", "b.csv"]);
        assert_eq!(store.read_object("data", "b.csv").await.unwrap(), b"2".to_vec());
        assert!(store.list_objects("empty").await.unwrap().is_empty());
    }
}
