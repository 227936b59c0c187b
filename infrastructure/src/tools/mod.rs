//! Tool implementations for blob-agent
//!
//! - [`ToolRegistry`]: name-unique tool storage, filled once at startup
//! - [`RegistryToolExecutor`]: validates and runs calls, containing failures
//! - [`blob`]: the built-in `list_blobs` / `read_csv_blob` tools
//! - [`JsonSchemaToolConverter`]: function-tool JSON for the model provider

pub mod blob;
pub mod csv_preview;
pub mod executor;
pub mod registry;
pub mod schema;

pub use blob::{ListBlobsTool, ReadCsvBlobTool, register_blob_tools};
pub use executor::RegistryToolExecutor;
pub use registry::{RegisteredTool, ToolRegistry};
pub use schema::JsonSchemaToolConverter;
