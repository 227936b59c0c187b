//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::config::ReplConfig;
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::ProgressMode;
use blob_agent_application::{LlmGateway, RunTurnError, RunTurnUseCase, ToolExecutorPort};
use blob_agent_domain::Transcript;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Whether a line ends the session (`exit` / `quit`, any case)
pub fn is_exit_command(line: &str) -> bool {
    let line = line.trim();
    line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit")
}

/// Interactive chat REPL
///
/// Owns the transcript for the whole session; every line the user enters is
/// one turn resolved by [`RunTurnUseCase`].
pub struct ChatRepl<G: LlmGateway + 'static, T: ToolExecutorPort + 'static> {
    use_case: RunTurnUseCase<G, T>,
    transcript: Transcript,
    config: ReplConfig,
    container: String,
}

impl<G: LlmGateway + 'static, T: ToolExecutorPort + 'static> ChatRepl<G, T> {
    /// Create a new ChatRepl
    pub fn new(
        use_case: RunTurnUseCase<G, T>,
        transcript: Transcript,
        container: impl Into<String>,
    ) -> Self {
        Self {
            use_case,
            transcript,
            config: ReplConfig::default(),
            container: container.into(),
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Run the interactive REPL until `exit`, `quit` or EOF
    pub async fn run(&mut self) -> RlResult<()> {
        if !self.config.color {
            colored::control::set_override(false);
        }

        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        println!();
        println!(
            "{}",
            ConsoleFormatter::welcome(self.use_case.model(), &self.container)
        );

        loop {
            match rl.readline("User: ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if is_exit_command(line) {
                        println!("{}", ConsoleFormatter::goodbye());
                        break;
                    }

                    let _ = rl.add_history_entry(line);
                    self.process_line(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl-C at the prompt only discards the current line
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", ConsoleFormatter::goodbye());
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            if let Err(e) = rl.save_history(path) {
                warn!("Failed to save history to {}: {}", path.display(), e);
            }
        }

        Ok(())
    }

    /// Run one turn, cancelling it if the user presses Ctrl-C meanwhile
    async fn process_line(&mut self, line: &str) {
        let token = CancellationToken::new();
        let watcher = {
            let token = token.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    debug!("Ctrl-C received, cancelling turn");
                    token.cancel();
                }
            })
        };

        let result = self.handle_turn(line, Some(&token)).await;
        watcher.abort();

        match result {
            Ok(answer) => println!("{}\n", ConsoleFormatter::reply(&answer)),
            Err(e) if e.is_cancelled() => println!("{}\n", ConsoleFormatter::cancelled()),
            Err(e) => println!("{}\n", ConsoleFormatter::error(&e.to_string())),
        }
    }

    /// Resolve one user line against the session transcript.
    ///
    /// Errors leave the transcript as the use case left it, so the next
    /// turn continues the same conversation.
    pub async fn handle_turn(
        &mut self,
        line: &str,
        cancellation: Option<&CancellationToken>,
    ) -> Result<String, RunTurnError> {
        let progress = ProgressMode::detect(self.config.show_progress).notifier();

        self.use_case
            .execute_with_progress(&mut self.transcript, line, progress.as_ref(), cancellation)
            .await
    }
}
