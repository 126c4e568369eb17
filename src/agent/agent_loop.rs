//! Agent loop with tool calling support
//!
//! One run answers one query with a bounded reason → act → observe cycle:
//! - Reason: send the latest turn to the reasoner
//! - Act: if the output is a known tool call, invoke the tool
//! - Observe: record the tool result and re-prompt for the final answer
//!
//! Every failure ends the run with a degraded answer. Nothing is retried and
//! `run` never returns an error.

use anyhow::Result;
use std::sync::Arc;
use tracing::Instrument;

use super::command::ModelCommand;
use super::config::AgentConfig;
use super::outcome::{AgentOutcome, StopReason};
use super::prompt;
use crate::cli::Console;
use crate::conversation::{Conversation, Turn};
use crate::llm::Reasoner;
use crate::tools::ToolRegistry;

/// Answer returned when the reasoner cannot be reached
pub const REASONER_ERROR_ANSWER: &str =
    "An error occurred while communicating with the AI. Please try again.";

/// Agent that drives the tool-use loop
pub struct Agent {
    reasoner: Arc<dyn Reasoner>,
    tools: ToolRegistry,
    config: AgentConfig,
    /// Instruction prompt, built once from the registered tools
    instruction: String,
    console: Option<Console>,
}

/// Counters for one run
#[derive(Default)]
struct RunStats {
    reasoner_calls: usize,
    tool_invocations: usize,
}

impl Agent {
    /// Create a new Agent
    ///
    /// Fails if the configuration is invalid.
    pub fn new(
        reasoner: Arc<dyn Reasoner>,
        mut tools: ToolRegistry,
        config: AgentConfig,
    ) -> Result<Self> {
        config.validate()?;

        tracing::info!(
            "Creating Agent with reasoner '{}', tools {:?}, max {} iterations",
            reasoner.name(),
            tools.tool_names(),
            config.max_iterations
        );

        if config.tool_timeout.is_some() {
            tools.set_timeout(config.tool_timeout);
        }

        let instruction = prompt::instruction_prompt(&tools.signatures());

        Ok(Self {
            reasoner,
            tools,
            config,
            instruction,
            console: None,
        })
    }

    /// Print progress to a console
    pub fn with_console(mut self, console: Console) -> Self {
        self.console = Some(console);
        self
    }

    /// Get a reference to the console, if one is attached
    pub fn console(&self) -> Option<&Console> {
        self.console.as_ref()
    }

    /// The configuration in use
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// The instruction prompt sent ahead of every request
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Answer one query
    pub async fn run(&self, user_query: &str) -> AgentOutcome {
        let conversation = Conversation::new(user_query);
        let span = tracing::info_span!("agent_run", run_id = %conversation.id());
        self.drive(conversation).instrument(span).await
    }

    async fn drive(&self, mut conversation: Conversation) -> AgentOutcome {
        let mut stats = RunStats::default();
        let user_query = conversation.query().to_string();

        tracing::info!("User query: {}", user_query);
        if let Some(console) = &self.console {
            console.print_user(&user_query);
        }

        for iteration in 1..=self.config.max_iterations {
            tracing::debug!("Iteration {}/{}", iteration, self.config.max_iterations);

            let prompt = prompt::full_prompt(&self.instruction, &conversation.last().content);
            tracing::debug!("Prompt sent to reasoner:\n{}", prompt);

            stats.reasoner_calls += 1;
            let llm_output = match self.call_reasoner(&prompt).await {
                Ok(output) => output,
                Err(e) => {
                    tracing::error!("Reasoner call failed: {:#}", e);
                    return self.finish(
                        conversation,
                        stats,
                        REASONER_ERROR_ANSWER.to_string(),
                        StopReason::ReasonerFailed(format!("{:#}", e)),
                    );
                }
            };

            tracing::info!("Reasoner output: {}", llm_output);
            if let Some(console) = &self.console {
                console.print_reasoner_output(&llm_output);
            }

            let (tool_name, tool_args) = match ModelCommand::parse(&llm_output) {
                ModelCommand::DirectAnswer(answer) => {
                    tracing::info!("Reasoner provided a direct answer");
                    return self.finish(conversation, stats, answer, StopReason::DirectAnswer);
                }
                ModelCommand::ToolCall {
                    tool_name,
                    tool_args,
                } => (tool_name, tool_args),
            };

            if tool_name.is_empty() || !self.tools.has(&tool_name) {
                tracing::warn!(
                    "Invalid tool call '{}', answering with the raw output",
                    tool_name
                );
                return self.finish(conversation, stats, llm_output, StopReason::InvalidToolCall);
            }

            if let Some(console) = &self.console {
                console.print_tool_action(&tool_name, &tool_args);
            }

            stats.tool_invocations += 1;
            let tool_result = match self.tools.invoke(&tool_name, &tool_args).await {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!("Tool execution failed: {}", e);
                    if let Some(console) = &self.console {
                        console.print_tool_result(&e.to_string(), true);
                    }
                    return self.finish(
                        conversation,
                        stats,
                        llm_output,
                        StopReason::ToolFailed(e.to_string()),
                    );
                }
            };

            tracing::info!("Tool '{}' result: {}", tool_name, tool_result);
            if let Some(console) = &self.console {
                console.print_tool_result(&tool_result, false);
            }

            conversation.push(Turn::tool_output(prompt::tool_output_content(
                &tool_name,
                &tool_result,
            )));
            conversation.push(Turn::user(prompt::reprompt(&tool_result, &user_query)));
        }

        tracing::warn!(
            "Max iterations ({}) reached without a final answer",
            self.config.max_iterations
        );
        let fallback = conversation.last().content.clone();
        self.finish(conversation, stats, fallback, StopReason::IterationsExhausted)
    }

    async fn call_reasoner(&self, prompt: &str) -> Result<String> {
        match self.config.reasoner_timeout {
            Some(after) => tokio::time::timeout(after, self.reasoner.respond(prompt))
                .await
                .map_err(|_| anyhow::anyhow!("reasoner timed out after {:?}", after))?,
            None => self.reasoner.respond(prompt).await,
        }
    }

    fn finish(
        &self,
        conversation: Conversation,
        stats: RunStats,
        answer: String,
        stop: StopReason,
    ) -> AgentOutcome {
        tracing::info!(
            "Run finished ({}) after {} reasoner call(s), {} tool invocation(s)",
            stop,
            stats.reasoner_calls,
            stats.tool_invocations
        );
        if let Some(console) = &self.console {
            console.print_final(&answer, &stop);
        }

        AgentOutcome {
            answer,
            stop,
            reasoner_calls: stats.reasoner_calls,
            tool_invocations: stats.tool_invocations,
            conversation,
        }
    }
}
