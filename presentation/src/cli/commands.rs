//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for blob-agent
#[derive(Parser, Debug)]
#[command(name = "blob-agent")]
#[command(author, version, about = "Chat with an Azure OpenAI model that can read your Blob Storage")]
#[command(long_about = r#"
blob-agent is an interactive chat agent. The model can call two tools against
the configured storage container: list_blobs and read_csv_blob.

Credentials come from the environment (a .env file in the working directory
is loaded first):
  AZURE_OPENAI_ENDPOINT, AZURE_OPENAI_DEPLOYMENT_NAME, AZURE_OPENAI_API_KEY,
  AZURE_OPENAI_API_VERSION, AZURE_STORAGE_ACCOUNT_NAME,
  AZURE_STORAGE_ACCOUNT_KEY, AZURE_STORAGE_CONTAINER_NAME

Configuration files are loaded from (in priority order):
1. --config <path>            Explicit config file
2. ./blob-agent.toml          Project-level config
3. ~/.config/blob-agent/config.toml   Global config

Type 'exit' or 'quit' to leave the chat. Ctrl-C cancels a running turn.
"#)]
pub struct Cli {
    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Maximum tool-call rounds per turn (overrides config)
    #[arg(long, value_name = "N")]
    pub max_tool_rounds: Option<usize>,

    /// Write conversation events as JSONL to this file (overrides config)
    #[arg(long, value_name = "PATH")]
    pub log_conversation: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Show configuration sources and exit
    #[arg(long)]
    pub show_config: bool,
}
