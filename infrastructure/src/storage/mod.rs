//! Blob store adapters

pub mod azure_blob;
pub mod memory;

pub use azure_blob::{AzureBlobSettings, AzureBlobStore};
pub use memory::InMemoryBlobStore;
