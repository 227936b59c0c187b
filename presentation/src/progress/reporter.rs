//! Progress reporting for agent turns

use blob_agent_application::{NoTurnProgress, TurnProgressNotifier};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::sync::Mutex;
use std::time::Duration;

/// How turn progress is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// Nothing (`--quiet`)
    Hidden,
    /// Plain `[Tool]` lines, for piped or redirected output
    Plain,
    /// Spinner plus `[Tool]` lines
    Spinner,
}

impl ProgressMode {
    pub fn from_flags(show_progress: bool, is_terminal: bool) -> Self {
        match (show_progress, is_terminal) {
            (false, _) => Self::Hidden,
            (true, false) => Self::Plain,
            (true, true) => Self::Spinner,
        }
    }

    /// Mode for the current stdout
    pub fn detect(show_progress: bool) -> Self {
        Self::from_flags(show_progress, std::io::stdout().is_terminal())
    }

    pub fn notifier(self) -> Box<dyn TurnProgressNotifier> {
        match self {
            Self::Hidden => Box::new(NoTurnProgress),
            Self::Plain => Box::new(SimpleProgress::new()),
            Self::Spinner => Box::new(ProgressReporter::new()),
        }
    }
}

/// Reports turn progress with a spinner while the model is thinking
/// and one line per tool call.
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn clear_spinner(&self) {
        let taken = self.spinner.lock().ok().and_then(|mut guard| guard.take());
        if let Some(pb) = taken {
            pb.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnProgressNotifier for ProgressReporter {
    fn on_model_request(&self, round: usize) {
        self.clear_spinner();

        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        let message = if round <= 1 {
            "Thinking...".to_string()
        } else {
            format!("Thinking... (request {})", round)
        };
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut guard) = self.spinner.lock() {
            *guard = Some(pb);
        }
    }

    fn on_model_response(&self, _round: usize) {
        self.clear_spinner();
    }

    fn on_tool_call(&self, tool_name: &str, args_preview: &str) {
        println!("{}", tool_call_line(tool_name, args_preview));
    }

    fn on_tool_result(&self, tool_name: &str, success: bool) {
        if !success {
            println!("  {} {} failed", "x".red(), tool_name);
        }
    }
}

/// Plain progress output without spinners (for non-interactive terminals)
pub struct SimpleProgress;

impl SimpleProgress {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SimpleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnProgressNotifier for SimpleProgress {
    fn on_model_request(&self, _round: usize) {}

    fn on_tool_call(&self, tool_name: &str, args_preview: &str) {
        println!("{}", tool_call_line(tool_name, args_preview));
    }

    fn on_tool_result(&self, tool_name: &str, success: bool) {
        if !success {
            println!("  {} failed", tool_name);
        }
    }
}

/// One line announcing a tool invocation, e.g. `[Tool] read_csv_blob: sales.csv`
pub fn tool_call_line(tool_name: &str, args_preview: &str) -> String {
    let tag = "[Tool]".cyan().bold();
    if args_preview.is_empty() {
        format!("{} {}", tag, tool_name)
    } else {
        format!("{} {}: {}", tag, tool_name, args_preview)
    }
}
