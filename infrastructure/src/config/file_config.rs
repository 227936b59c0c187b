//! Raw configuration data types
//!
//! These structs mirror the TOML file layout. Every credential is optional
//! here; [`FileConfig::validate`] turns them into a [`ValidatedConfig`] once
//! all sources have been merged.

use crate::providers::azure_openai::AzureOpenAiSettings;
use crate::storage::azure_blob::AzureBlobSettings;
use blob_agent_application::ExecutionParams;
use blob_agent_domain::DEFAULT_SYSTEM_PROMPT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variables and the configuration keys they override.
///
/// Environment values win over every file.
pub const ENV_VARS: [(&str, &str); 7] = [
    ("AZURE_OPENAI_ENDPOINT", "openai.endpoint"),
    ("AZURE_OPENAI_DEPLOYMENT_NAME", "openai.deployment"),
    ("AZURE_OPENAI_API_KEY", "openai.api_key"),
    ("AZURE_OPENAI_API_VERSION", "openai.api_version"),
    ("AZURE_STORAGE_ACCOUNT_NAME", "storage.account_name"),
    ("AZURE_STORAGE_ACCOUNT_KEY", "storage.account_key"),
    ("AZURE_STORAGE_CONTAINER_NAME", "storage.container"),
];

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error(
        "Missing required configuration: {}. Set them in the environment, a .env file, or blob-agent.toml.",
        .0.join(", ")
    )]
    MissingVariables(Vec<&'static str>),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Azure OpenAI chat deployment
    pub openai: FileOpenAiConfig,
    /// Azure Blob Storage account and container
    pub storage: FileStorageConfig,
    /// Turn loop and logging behavior
    pub behavior: FileBehaviorConfig,
}

/// `[openai]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`
    pub endpoint: Option<String>,
    /// Deployment name requests are routed to
    pub deployment: Option<String>,
    /// API key (prefer `AZURE_OPENAI_API_KEY` over writing it to a file)
    pub api_key: Option<String>,
    /// REST API version, e.g. `2025-01-01-preview`
    pub api_version: Option<String>,
}

/// `[storage]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    pub account_name: Option<String>,
    /// Base64 account key (prefer `AZURE_STORAGE_ACCOUNT_KEY`)
    pub account_key: Option<String>,
    pub container: Option<String>,
    /// Blob service URL override (defaults to `https://{account}.blob.core.windows.net`)
    pub endpoint: Option<String>,
}

/// `[behavior]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    /// Maximum tool-call rounds per user turn
    pub max_tool_rounds: usize,
    /// Timeout for each provider or storage request, in seconds
    pub request_timeout_secs: u64,
    /// System prompt seeding every conversation
    pub system_prompt: Option<String>,
    /// Write conversation events as JSONL to this path
    pub conversation_log: Option<PathBuf>,
}

impl Default for FileBehaviorConfig {
    fn default() -> Self {
        let params = ExecutionParams::default();
        Self {
            max_tool_rounds: params.max_tool_rounds,
            request_timeout_secs: params.request_timeout.as_secs(),
            system_prompt: None,
            conversation_log: None,
        }
    }
}

impl FileBehaviorConfig {
    pub fn system_prompt(&self) -> &str {
        self.system_prompt.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }

    pub fn execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_max_tool_rounds(self.max_tool_rounds)
            .with_request_timeout(Duration::from_secs(self.request_timeout_secs))
    }
}

/// Configuration with every required value present
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub openai: AzureOpenAiSettings,
    pub storage: AzureBlobSettings,
    pub behavior: FileBehaviorConfig,
}

impl ValidatedConfig {
    pub fn execution_params(&self) -> ExecutionParams {
        self.behavior.execution_params()
    }
}

/// A present, non-blank value, or the variable name is recorded as missing
fn required(value: &Option<String>, var: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => {
            missing.push(var);
            String::new()
        }
    }
}

impl FileConfig {
    /// Check that every required value is present.
    ///
    /// Reports all missing variables at once rather than the first one.
    pub fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        let mut missing = Vec::new();
        let endpoint = required(&self.openai.endpoint, "AZURE_OPENAI_ENDPOINT", &mut missing);
        let deployment = required(
            &self.openai.deployment,
            "AZURE_OPENAI_DEPLOYMENT_NAME",
            &mut missing,
        );
        let api_key = required(&self.openai.api_key, "AZURE_OPENAI_API_KEY", &mut missing);
        let api_version = required(
            &self.openai.api_version,
            "AZURE_OPENAI_API_VERSION",
            &mut missing,
        );
        let account_name = required(
            &self.storage.account_name,
            "AZURE_STORAGE_ACCOUNT_NAME",
            &mut missing,
        );
        let account_key = required(
            &self.storage.account_key,
            "AZURE_STORAGE_ACCOUNT_KEY",
            &mut missing,
        );
        let container = required(
            &self.storage.container,
            "AZURE_STORAGE_CONTAINER_NAME",
            &mut missing,
        );

        if !missing.is_empty() {
            return Err(ConfigError::MissingVariables(missing));
        }
        if self.behavior.max_tool_rounds == 0 {
            return Err(ConfigError::Invalid(
                "behavior.max_tool_rounds must be at least 1".to_string(),
            ));
        }
        if self.behavior.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "behavior.request_timeout_secs must be at least 1".to_string(),
            ));
        }

        let timeout = Duration::from_secs(self.behavior.request_timeout_secs);
        Ok(ValidatedConfig {
            openai: AzureOpenAiSettings {
                endpoint,
                deployment,
                api_key,
                api_version,
                timeout,
            },
            storage: AzureBlobSettings {
                account_name,
                account_key,
                container,
                endpoint: self.storage.endpoint.clone(),
                timeout,
            },
            behavior: self.behavior.clone(),
        })
    }
}
