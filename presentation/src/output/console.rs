//! Console output for the chat session

use colored::Colorize;

/// Formats agent replies, errors and banners for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Banner printed when the session starts
    pub fn welcome(deployment: &str, container: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", "--- Azure Blob Storage Agent ---".cyan().bold()));
        output.push_str(&format!("{} {}\n", "Model:".bold(), deployment));
        output.push_str(&format!("{} {}\n", "Container:".bold(), container));
        output.push_str(&format!(
            "{}\n",
            "Type 'exit' or 'quit' to end the session. Ctrl-C cancels a running turn.".dimmed()
        ));
        output
    }

    /// Final answer of a turn
    pub fn reply(text: &str) -> String {
        format!("{} {}", "Agent:".green().bold(), text)
    }

    /// A turn that ended without an answer
    pub fn error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    /// A turn the user interrupted
    pub fn cancelled() -> String {
        format!("{}", "Turn cancelled.".yellow())
    }

    pub fn goodbye() -> String {
        format!("{}", "Goodbye!".dimmed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_and_error_prefixes() {
        colored::control::set_override(false);
        assert_eq!(ConsoleFormatter::reply("3 blobs"), "Agent: 3 blobs");
        assert_eq!(
            ConsoleFormatter::error("Model provider error: timed out"),
            "Error: Model provider error: timed out"
        );
    }

    #[test]
    fn test_welcome_names_model_and_container() {
        colored::control::set_override(false);
        let banner = ConsoleFormatter::welcome("gpt-4o", "csv-data");
        assert!(banner.starts_with("--- Azure Blob Storage Agent ---"));
        assert!(banner.contains("Model: gpt-4o"));
        assert!(banner.contains("Container: csv-data"));
    }
}
