//! Progress notification port
//!
//! Defines the interface for reporting progress while a user turn is resolved.

/// Callback for progress updates during a turn
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain lines, nothing).
pub trait TurnProgressNotifier: Send + Sync {
    /// Called before each request to the model provider (round starts at 1)
    fn on_model_request(&self, round: usize);

    /// Called when the provider answered (or failed)
    fn on_model_response(&self, _round: usize) {}

    /// Called before a tool is executed
    fn on_tool_call(&self, tool_name: &str, args_preview: &str);

    /// Called after a tool finished
    fn on_tool_result(&self, tool_name: &str, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoTurnProgress;

impl TurnProgressNotifier for NoTurnProgress {
    fn on_model_request(&self, _round: usize) {}
    fn on_tool_call(&self, _tool_name: &str, _args_preview: &str) {}
    fn on_tool_result(&self, _tool_name: &str, _success: bool) {}
}
