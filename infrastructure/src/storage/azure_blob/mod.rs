//! Azure Blob Storage adapter
//!
//! [`AzureBlobStore`] implements [`BlobStorePort`](blob_agent_application::BlobStorePort)
//! with two Shared Key signed GETs: container listing (with `NextMarker`
//! pagination) and blob download.

mod auth;
mod client;
mod listing;

pub use auth::{STORAGE_API_VERSION, SharedKeyCredential};
pub use client::{AzureBlobSettings, AzureBlobStore};
pub use listing::ListPage;
