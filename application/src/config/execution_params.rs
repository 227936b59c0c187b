//! Execution parameters for the turn loop.
//!
//! [`ExecutionParams`] groups the static parameters that control the
//! completion loop in [`RunTurnUseCase`](crate::use_cases::run_turn::RunTurnUseCase).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Turn loop control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Maximum tool-call rounds in a single user turn before giving up.
    pub max_tool_rounds: usize,
    /// Upper bound for a single provider or storage request.
    pub request_timeout: Duration,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_tool_rounds: 10,
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl ExecutionParams {
    pub fn with_max_tool_rounds(mut self, max: usize) -> Self {
        self.max_tool_rounds = max;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
