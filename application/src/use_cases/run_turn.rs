//! Run Turn use case
//!
//! Resolves one user message into one assistant reply. The driver appends the
//! user entry, then alternates between asking the model and running the tools
//! it requested until a final answer arrives:
//!
//! ```text
//! AwaitingModel ──FinalAnswer──▶ Done
//!      │  ▲
//!      │  └──────────── all results appended
//!      ▼
//! ToolCallsRequested ──▶ ExecutingTools
//! ```
//!
//! Tool failures never end a turn; they come back to the model as `Error:`
//! observations. Only provider failures, the round budget and cancellation do.
//! Whatever happens, every entry appended so far stays in the transcript.

use crate::config::ExecutionParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{NoTurnProgress, TurnProgressNotifier};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::shared::{is_cancelled, until_cancelled};
use crate::use_cases::tool_helpers::tool_args_preview;
use blob_agent_domain::{
    CompletionOutcome, ToolCall, ToolDefinition, ToolError, ToolResult, Transcript,
    TranscriptEntry, truncate,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Observation recorded for tool calls that were interrupted by cancellation
const CANCELLED_OBSERVATION: &str = "Cancelled by user before the tool completed";

/// Errors that end a turn without a final answer
#[derive(Error, Debug)]
pub enum RunTurnError {
    #[error("Model provider error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("No final answer after {0} tool rounds")]
    ToolLoopExceeded(usize),

    #[error("Turn cancelled")]
    Cancelled,
}

impl RunTurnError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunTurnError::Cancelled)
    }
}

/// Where the driver is within a turn
enum TurnState {
    AwaitingModel,
    ExecutingTools(Vec<ToolCall>),
}

/// Use case for resolving a single user turn
pub struct RunTurnUseCase<G: LlmGateway + 'static, T: ToolExecutorPort + 'static> {
    gateway: Arc<G>,
    tool_executor: Arc<T>,
    params: ExecutionParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static, T: ToolExecutorPort + 'static> Clone for RunTurnUseCase<G, T> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            tool_executor: self.tool_executor.clone(),
            params: self.params.clone(),
            conversation_logger: self.conversation_logger.clone(),
        }
    }
}

impl<G: LlmGateway + 'static, T: ToolExecutorPort + 'static> RunTurnUseCase<G, T> {
    pub fn new(gateway: Arc<G>, tool_executor: Arc<T>) -> Self {
        Self {
            gateway,
            tool_executor,
            params: ExecutionParams::default(),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    /// Set a conversation logger for structured JSONL event logging
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn params(&self) -> &ExecutionParams {
        &self.params
    }

    /// Model identifier the gateway sends requests to
    pub fn model(&self) -> &str {
        self.gateway.model()
    }

    /// Resolve a turn without progress reporting or cancellation
    pub async fn execute(
        &self,
        transcript: &mut Transcript,
        user_input: &str,
    ) -> Result<String, RunTurnError> {
        self.execute_with_progress(transcript, user_input, &NoTurnProgress, None)
            .await
    }

    /// Resolve a turn, reporting progress and honoring the cancellation token
    pub async fn execute_with_progress(
        &self,
        transcript: &mut Transcript,
        user_input: &str,
        progress: &dyn TurnProgressNotifier,
        cancellation: Option<&CancellationToken>,
    ) -> Result<String, RunTurnError> {
        info!(model = self.gateway.model(), "Starting turn");

        transcript.append(TranscriptEntry::user(user_input));
        self.conversation_logger.log(ConversationEvent::new(
            "user_message",
            json!({ "text": user_input }),
        ));

        let tools = self.tool_executor.definitions();
        let max_rounds = self.params.max_tool_rounds;
        let mut rounds = 0usize;
        let mut state = TurnState::AwaitingModel;

        loop {
            state = match state {
                TurnState::AwaitingModel => {
                    if is_cancelled(cancellation) {
                        return Err(RunTurnError::Cancelled);
                    }

                    let request = rounds + 1;
                    progress.on_model_request(request);
                    let outcome = self
                        .request_completion(transcript, &tools, cancellation)
                        .await;
                    progress.on_model_response(request);

                    match outcome? {
                        CompletionOutcome::FinalAnswer { text } => {
                            info!(rounds, "Turn completed");
                            transcript.append(TranscriptEntry::assistant(text.clone()));
                            self.conversation_logger.log(ConversationEvent::new(
                                "assistant_message",
                                json!({ "text": text, "tool_rounds": rounds }),
                            ));
                            return Ok(text);
                        }
                        CompletionOutcome::ToolCallsRequested { calls } => {
                            if rounds >= max_rounds {
                                warn!(max_rounds, "Tool round budget exhausted");
                                return Err(RunTurnError::ToolLoopExceeded(max_rounds));
                            }
                            rounds += 1;
                            debug!(round = rounds, count = calls.len(), "Model requested tools");
                            TurnState::ExecutingTools(calls)
                        }
                    }
                }
                TurnState::ExecutingTools(calls) => {
                    transcript.append(TranscriptEntry::tool_calls(calls.clone()));
                    self.run_tools(transcript, &calls, progress, cancellation)
                        .await?;
                    TurnState::AwaitingModel
                }
            };
        }
    }

    async fn request_completion(
        &self,
        transcript: &Transcript,
        tools: &[ToolDefinition],
        cancellation: Option<&CancellationToken>,
    ) -> Result<CompletionOutcome, RunTurnError> {
        let request = tokio::time::timeout(
            self.params.request_timeout,
            self.gateway.complete(transcript.snapshot(), tools),
        );

        match until_cancelled(cancellation, request).await {
            None => Err(RunTurnError::Cancelled),
            Some(Err(_elapsed)) => Err(RunTurnError::Gateway(GatewayError::Timeout)),
            Some(Ok(result)) => Ok(result?),
        }
    }

    /// Execute the requested calls in order, appending one result per call.
    ///
    /// On cancellation every call still without a result is answered with a
    /// cancellation observation, so the transcript never holds a tool request
    /// the provider would consider unanswered.
    async fn run_tools(
        &self,
        transcript: &mut Transcript,
        calls: &[ToolCall],
        progress: &dyn TurnProgressNotifier,
        cancellation: Option<&CancellationToken>,
    ) -> Result<(), RunTurnError> {
        for (index, call) in calls.iter().enumerate() {
            let result = if is_cancelled(cancellation) {
                None
            } else {
                progress.on_tool_call(&call.tool_name, &tool_args_preview(call));
                self.conversation_logger.log(ConversationEvent::new(
                    "tool_call",
                    json!({
                        "id": call.id,
                        "tool": call.tool_name,
                        "arguments": call.arguments,
                    }),
                ));
                until_cancelled(cancellation, self.execute_tool(call)).await
            };

            let Some(result) = result else {
                for pending in &calls[index..] {
                    let cancelled = ToolResult::failure(
                        pending,
                        ToolError::execution_failed(CANCELLED_OBSERVATION),
                    );
                    transcript.append(TranscriptEntry::tool_result(&cancelled));
                }
                return Err(RunTurnError::Cancelled);
            };

            progress.on_tool_result(&call.tool_name, result.is_success());
            self.conversation_logger.log(ConversationEvent::new(
                "tool_result",
                json!({
                    "id": call.id,
                    "tool": call.tool_name,
                    "success": result.is_success(),
                    "duration_ms": result.duration_ms,
                    "observation": truncate(&result.observation(), 2000),
                }),
            ));
            transcript.append(TranscriptEntry::tool_result(&result));
        }
        Ok(())
    }

    async fn execute_tool(&self, call: &ToolCall) -> ToolResult {
        let started = Instant::now();
        match tokio::time::timeout(self.params.request_timeout, self.tool_executor.execute(call))
            .await
        {
            Ok(result) => result,
            Err(_) => {
                warn!(tool = %call.tool_name, "Tool execution timed out");
                ToolResult::failure(
                    call,
                    ToolError::execution_failed(format!(
                        "Tool '{}' timed out after {}s",
                        call.tool_name,
                        self.params.request_timeout.as_secs()
                    )),
                )
                .with_duration(started.elapsed().as_millis() as u64)
            }
        }
    }
}
