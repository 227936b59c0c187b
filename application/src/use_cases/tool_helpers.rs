//! Shared helpers for tool use cases.

use blob_agent_domain::ToolCall;

/// Extract a short preview string from tool call arguments.
///
/// Prefers `blob_name`, then falls back to the first string value by
/// argument name.
pub(crate) fn tool_args_preview(call: &ToolCall) -> String {
    if let Some(blob_name) = call.get_string("blob_name") {
        return truncate_preview(blob_name, 50);
    }
    let mut names: Vec<&String> = call.arguments.keys().collect();
    names.sort();
    for name in names {
        if let Some(s) = call.arguments[name].as_str() {
            return truncate_preview(s, 50);
        }
    }
    String::new()
}

fn truncate_preview(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
