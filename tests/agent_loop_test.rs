// Tests for the agent loop
//
// These run against scripted reasoners and in-memory tools; no network needed.
// Run with: cargo test --test agent_loop_test

use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tooluse_agent::agent::{Agent, AgentConfig, StopReason, REASONER_ERROR_ANSWER};
use tooluse_agent::conversation::Role;
use tooluse_agent::llm::{Reasoner, SimulatedReasoner};
use tooluse_agent::tools::{SimulatedWebSearchTool, Tool, ToolArgs, ToolRegistry};

const WEATHER_CALL: &str =
    r#"{"tool_name":"web_search","tool_args":{"query":"current weather in Loughman, Florida"}}"#;
const WEATHER_RESULT: &str = "Partly cloudy, 85°F (29°C), high humidity.";

/// Reasoner that replays scripted outputs and records every prompt
struct ScriptedReasoner {
    outputs: Vec<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedReasoner {
    fn new(outputs: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl Reasoner for ScriptedReasoner {
    async fn respond(&self, prompt: &str) -> Result<String> {
        let mut prompts = self.prompts.lock().unwrap();
        prompts.push(prompt.to_string());
        // Repeat the last output once the script runs out
        let index = (prompts.len() - 1).min(self.outputs.len() - 1);
        Ok(self.outputs[index].clone())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

struct FailingReasoner;

#[async_trait]
impl Reasoner for FailingReasoner {
    async fn respond(&self, _prompt: &str) -> Result<String> {
        anyhow::bail!("connection reset")
    }

    fn name(&self) -> &str {
        "failing"
    }
}

struct StalledReasoner;

#[async_trait]
impl Reasoner for StalledReasoner {
    async fn respond(&self, _prompt: &str) -> Result<String> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok("too late".to_string())
    }

    fn name(&self) -> &str {
        "stalled"
    }
}

/// web_search stand-in that counts invocations
struct CountingSearch {
    result: String,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl CountingSearch {
    fn new(result: &str) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                result: result.to_string(),
                fail: false,
                calls: calls.clone(),
            },
            calls,
        )
    }

    fn failing() -> (Self, Arc<AtomicUsize>) {
        let (mut tool, calls) = Self::new("");
        tool.fail = true;
        (tool, calls)
    }
}

#[async_trait]
impl Tool for CountingSearch {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web"
    }

    fn parameters(&self) -> &[&str] {
        &["query"]
    }

    async fn execute(&self, _args: &ToolArgs) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("search service unreachable");
        }
        Ok(self.result.clone())
    }
}

/// web_search stand-in that never answers in time
struct SlowSearch;

#[async_trait]
impl Tool for SlowSearch {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web"
    }

    fn parameters(&self) -> &[&str] {
        &["query"]
    }

    async fn execute(&self, _args: &ToolArgs) -> Result<String> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok("too late".to_string())
    }
}

fn agent_with(reasoner: Arc<dyn Reasoner>, tool: CountingSearch) -> Agent {
    Agent::new(
        reasoner,
        ToolRegistry::new().with_tool(tool),
        AgentConfig::default(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_prose_returns_after_one_call() -> Result<()> {
    let reasoner = ScriptedReasoner::new(&["I'm doing well, thanks for asking!"]);
    let (tool, tool_calls) = CountingSearch::new(WEATHER_RESULT);
    let agent = agent_with(reasoner.clone(), tool);

    let outcome = agent.run("Hello, how are you today?").await;

    assert_eq!(outcome.answer, "I'm doing well, thanks for asking!");
    assert_eq!(outcome.stop, StopReason::DirectAnswer);
    assert!(outcome.is_final_answer());
    assert_eq!(reasoner.calls(), 1);
    assert_eq!(outcome.reasoner_calls, 1);
    assert_eq!(tool_calls.load(Ordering::SeqCst), 0);
    assert_eq!(outcome.conversation.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_prompt_carries_instruction_and_query() -> Result<()> {
    let reasoner = ScriptedReasoner::new(&["Sure."]);
    let (tool, _) = CountingSearch::new(WEATHER_RESULT);
    let agent = agent_with(reasoner.clone(), tool);

    agent.run("Tell me a story about a dragon.").await;

    let prompt = &reasoner.prompts()[0];
    assert!(prompt.starts_with(agent.instruction()));
    assert!(prompt.contains("web_search(query: str) - Search the web"));
    assert!(prompt.ends_with("\n\nUser's request: Tell me a story about a dragon."));
    Ok(())
}

#[tokio::test]
async fn test_tool_then_answer() -> Result<()> {
    let reasoner = ScriptedReasoner::new(&[
        WEATHER_CALL,
        "It is partly cloudy and 85°F in Loughman right now.",
    ]);
    let (tool, tool_calls) = CountingSearch::new(WEATHER_RESULT);
    let agent = agent_with(reasoner.clone(), tool);

    let query = "What is the current weather in Loughman, Florida?";
    let outcome = agent.run(query).await;

    assert_eq!(
        outcome.answer,
        "It is partly cloudy and 85°F in Loughman right now."
    );
    assert_eq!(outcome.stop, StopReason::DirectAnswer);
    assert_eq!(reasoner.calls(), 2);
    assert_eq!(tool_calls.load(Ordering::SeqCst), 1);

    let turns = outcome.conversation.turns();
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[1].role, Role::ToolOutput);
    assert_eq!(
        turns[1].content,
        format!("Tool 'web_search' result: {}", WEATHER_RESULT)
    );
    assert_eq!(turns[2].role, Role::User);
    assert_eq!(
        turns[2].content,
        format!(
            "Based on the tool output: '{}', what is the answer to the original question: '{}'?",
            WEATHER_RESULT, query
        )
    );

    // The second prompt is built from the re-prompt turn
    assert!(reasoner.prompts()[1].ends_with(&turns[2].content));
    Ok(())
}

#[tokio::test]
async fn test_tool_result_embedded_byte_for_byte() -> Result<()> {
    let awkward = "line one\nline 'two'\t{\"json\": true} ünïcödé  ";
    let reasoner = ScriptedReasoner::new(&[WEATHER_CALL, "done"]);
    let (tool, _) = CountingSearch::new(awkward);
    let agent = agent_with(reasoner.clone(), tool);

    let outcome = agent.run("q").await;

    let turns = outcome.conversation.turns();
    assert!(turns[1].content.ends_with(awkward));
    assert!(turns[2].content.contains(&format!("'{}'", awkward)));
    assert!(reasoner.prompts()[1].contains(awkward));
    Ok(())
}

#[tokio::test]
async fn test_unknown_tool_returns_raw_output() -> Result<()> {
    let raw = r#"{"tool_name":"unknown_tool","tool_args":{}}"#;
    let reasoner = ScriptedReasoner::new(&[raw]);
    let (tool, tool_calls) = CountingSearch::new(WEATHER_RESULT);
    let agent = agent_with(reasoner.clone(), tool);

    let outcome = agent.run("Use a tool you don't have").await;

    assert_eq!(outcome.answer, raw);
    assert_eq!(outcome.stop, StopReason::InvalidToolCall);
    assert!(!outcome.is_final_answer());
    assert_eq!(reasoner.calls(), 1);
    assert_eq!(outcome.tool_invocations, 0);
    assert_eq!(tool_calls.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn test_empty_tool_name_is_invalid() -> Result<()> {
    let raw = r#"{"tool_name": "", "tool_args": {"query": "x"}}"#;
    let reasoner = ScriptedReasoner::new(&[raw]);
    let (tool, tool_calls) = CountingSearch::new(WEATHER_RESULT);
    let agent = agent_with(reasoner, tool);

    let outcome = agent.run("q").await;

    assert_eq!(outcome.answer, raw);
    assert_eq!(outcome.stop, StopReason::InvalidToolCall);
    assert_eq!(tool_calls.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn test_wrong_shape_json_is_direct_answer() -> Result<()> {
    let raw = r#"{"answer": "Paris"}"#;
    let reasoner = ScriptedReasoner::new(&[raw]);
    let (tool, _) = CountingSearch::new(WEATHER_RESULT);
    let agent = agent_with(reasoner, tool);

    let outcome = agent.run("What is the capital of France?").await;

    assert_eq!(outcome.answer, raw);
    assert_eq!(outcome.stop, StopReason::DirectAnswer);
    Ok(())
}

#[tokio::test]
async fn test_tool_failure_returns_raw_output() -> Result<()> {
    let reasoner = ScriptedReasoner::new(&[WEATHER_CALL, "never reached"]);
    let (tool, tool_calls) = CountingSearch::failing();
    let agent = agent_with(reasoner.clone(), tool);

    let outcome = agent.run("weather?").await;

    assert_eq!(outcome.answer, WEATHER_CALL);
    match &outcome.stop {
        StopReason::ToolFailed(e) => assert!(e.contains("search service unreachable")),
        other => panic!("unexpected stop reason: {:?}", other),
    }
    assert_eq!(reasoner.calls(), 1);
    assert_eq!(tool_calls.load(Ordering::SeqCst), 1);
    assert_eq!(outcome.conversation.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_bad_arguments_end_the_run() -> Result<()> {
    let raw = r#"{"tool_name":"web_search","tool_args":{"q":"typo"}}"#;
    let reasoner = ScriptedReasoner::new(&[raw]);
    let (tool, tool_calls) = CountingSearch::new(WEATHER_RESULT);
    let agent = agent_with(reasoner, tool);

    let outcome = agent.run("q").await;

    assert_eq!(outcome.answer, raw);
    assert!(matches!(outcome.stop, StopReason::ToolFailed(_)));
    assert_eq!(tool_calls.load(Ordering::SeqCst), 0);
    Ok(())
}

// Exhaustion returns the last re-prompt, not a tool result. This mirrors the
// behavior of the scripts the loop was modelled on and is not a promise.
#[tokio::test]
async fn test_exhaustion_returns_last_turn() -> Result<()> {
    let reasoner = ScriptedReasoner::new(&[WEATHER_CALL]);
    let (tool, tool_calls) = CountingSearch::new(WEATHER_RESULT);
    let agent = agent_with(reasoner.clone(), tool);

    let query = "What is the current weather in Loughman, Florida?";
    let outcome = agent.run(query).await;

    assert_eq!(outcome.stop, StopReason::IterationsExhausted);
    assert_eq!(reasoner.calls(), 3);
    assert_eq!(tool_calls.load(Ordering::SeqCst), 3);
    assert_eq!(outcome.conversation.len(), 7);
    assert_eq!(outcome.answer, outcome.conversation.last().content);
    assert_eq!(
        outcome.answer,
        format!(
            "Based on the tool output: '{}', what is the answer to the original question: '{}'?",
            WEATHER_RESULT, query
        )
    );
    assert_ne!(outcome.answer, WEATHER_RESULT);
    Ok(())
}

#[tokio::test]
async fn test_iteration_budget_is_configurable() -> Result<()> {
    for max in [1, 2, 5] {
        let reasoner = ScriptedReasoner::new(&[WEATHER_CALL]);
        let (tool, _) = CountingSearch::new(WEATHER_RESULT);
        let agent = Agent::new(
            reasoner.clone(),
            ToolRegistry::new().with_tool(tool),
            AgentConfig::new().with_max_iterations(max),
        )?;

        let outcome = agent.run("loop forever").await;

        assert_eq!(reasoner.calls(), max);
        assert_eq!(outcome.reasoner_calls, max);
        assert_eq!(outcome.stop, StopReason::IterationsExhausted);
    }
    Ok(())
}

#[tokio::test]
async fn test_zero_iterations_rejected() {
    let reasoner = ScriptedReasoner::new(&["hi"]);
    let result = Agent::new(
        reasoner,
        ToolRegistry::new(),
        AgentConfig::new().with_max_iterations(0),
    );
    assert!(result.is_err());
}

#[tokio::test]
async fn test_empty_query_is_forwarded() -> Result<()> {
    let reasoner = ScriptedReasoner::new(&["What would you like to know?"]);
    let (tool, _) = CountingSearch::new(WEATHER_RESULT);
    let agent = agent_with(reasoner.clone(), tool);

    let outcome = agent.run("").await;

    assert_eq!(outcome.answer, "What would you like to know?");
    assert!(reasoner.prompts()[0].ends_with("User's request: "));
    Ok(())
}

#[tokio::test]
async fn test_reasoner_failure_returns_apology() -> Result<()> {
    let (tool, tool_calls) = CountingSearch::new(WEATHER_RESULT);
    let agent = agent_with(Arc::new(FailingReasoner), tool);

    let outcome = agent.run("anything").await;

    assert_eq!(outcome.answer, REASONER_ERROR_ANSWER);
    match &outcome.stop {
        StopReason::ReasonerFailed(e) => assert!(e.contains("connection reset")),
        other => panic!("unexpected stop reason: {:?}", other),
    }
    assert_eq!(outcome.reasoner_calls, 1);
    assert_eq!(tool_calls.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_reasoner_timeout() -> Result<()> {
    let agent = Agent::new(
        Arc::new(StalledReasoner),
        ToolRegistry::new(),
        AgentConfig::new().with_reasoner_timeout(Duration::from_secs(5)),
    )?;

    let outcome = agent.run("hello").await;

    assert_eq!(outcome.answer, REASONER_ERROR_ANSWER);
    match &outcome.stop {
        StopReason::ReasonerFailed(e) => assert!(e.contains("timed out")),
        other => panic!("unexpected stop reason: {:?}", other),
    }
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_tool_timeout_from_config_ends_run() -> Result<()> {
    let reasoner = ScriptedReasoner::new(&[WEATHER_CALL, "never reached"]);
    let agent = Agent::new(
        reasoner.clone(),
        ToolRegistry::new().with_tool(SlowSearch),
        AgentConfig::new().with_tool_timeout(Duration::from_secs(5)),
    )?;

    let outcome = agent.run("What is the current weather in Loughman, Florida?").await;

    assert_eq!(outcome.answer, WEATHER_CALL);
    match &outcome.stop {
        StopReason::ToolFailed(e) => assert!(e.contains("timed out after 5s")),
        other => panic!("unexpected stop reason: {:?}", other),
    }
    assert_eq!(reasoner.calls(), 1);
    assert_eq!(outcome.tool_invocations, 1);
    assert_eq!(outcome.conversation.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_simulated_stack_answers_from_search() -> Result<()> {
    let agent = Agent::new(
        Arc::new(SimulatedReasoner::new()?),
        ToolRegistry::new().with_tool(SimulatedWebSearchTool::new()),
        AgentConfig::default(),
    )?;

    let outcome = agent.run("What is the capital of France?").await;
    assert_eq!(outcome.stop, StopReason::DirectAnswer);
    assert_eq!(outcome.reasoner_calls, 2);
    assert_eq!(
        outcome.answer,
        "Here is what I found: The capital of France is Paris."
    );

    let outcome = agent.run("Hello, how are you today?").await;
    assert_eq!(outcome.reasoner_calls, 1);
    assert_eq!(
        outcome.answer,
        "Hello! I am a helpful AI agent. How can I assist you today?"
    );
    Ok(())
}
