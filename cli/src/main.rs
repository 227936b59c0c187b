//! CLI entrypoint for blob-agent
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use blob_agent_application::{BlobStorePort, ConversationLogger, RunTurnUseCase};
use blob_agent_domain::Transcript;
use blob_agent_infrastructure::{
    AzureBlobStore, AzureOpenAiGateway, ConfigLoader, JsonlConversationLogger,
    RegistryToolExecutor, ToolRegistry, register_blob_tools,
};
use blob_agent_presentation::{ChatRepl, Cli, ConsoleFormatter, ReplConfig};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the variables may already be exported
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    info!("Starting blob-agent");

    let config = match ConfigLoader::load_validated(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", ConsoleFormatter::error(&e.to_string()));
            std::process::exit(1);
        }
    };

    let mut params = config.execution_params();
    if let Some(max) = cli.max_tool_rounds {
        if max == 0 {
            bail!("--max-tool-rounds must be at least 1");
        }
        params = params.with_max_tool_rounds(max);
    }

    // === Dependency Injection ===
    let gateway = Arc::new(AzureOpenAiGateway::new(config.openai.clone())?);

    let store: Arc<dyn BlobStorePort> = Arc::new(AzureBlobStore::new(&config.storage)?);
    let mut registry = ToolRegistry::new();
    register_blob_tools(&mut registry, store, config.storage.container.clone())?;
    let executor = Arc::new(RegistryToolExecutor::new(Arc::new(registry)));

    let mut use_case = RunTurnUseCase::new(gateway, executor).with_params(params);

    let log_path = cli
        .log_conversation
        .clone()
        .or_else(|| config.behavior.conversation_log.clone());
    if let Some(path) = log_path {
        let logger = JsonlConversationLogger::new(&path).with_context(|| {
            format!("Failed to open conversation log {}", path.display())
        })?;
        info!("Logging conversation to {}", path.display());
        let logger: Arc<dyn ConversationLogger> = Arc::new(logger);
        use_case = use_case.with_conversation_logger(logger);
    }

    let transcript = Transcript::with_system_prompt(config.behavior.system_prompt());
    let repl_config = ReplConfig::default()
        .with_show_progress(!cli.quiet)
        .with_color(!cli.no_color);

    let mut repl = ChatRepl::new(use_case, transcript, config.storage.container.clone())
        .with_config(repl_config);
    repl.run().await?;

    Ok(())
}
