//! Configuration loading for blob-agent
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `AZURE_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./blob-agent.toml` or `./.blob-agent.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/blob-agent/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigError, ENV_VARS, FileBehaviorConfig, FileConfig, FileOpenAiConfig, FileStorageConfig,
    ValidatedConfig,
};
pub use loader::ConfigLoader;
