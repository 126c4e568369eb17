//! Simulated Agent Example
//!
//! Runs the agent loop offline against the simulated reasoner and the
//! simulated web search, over five canned queries.
//!
//! Run with: cargo run --example simulated_agent

use anyhow::Result;
use std::sync::Arc;

use tooluse_agent::{
    agent::{Agent, AgentConfig},
    cli::Console,
    llm::SimulatedReasoner,
    logging,
    tools::{SimulatedWebSearchTool, ToolRegistry},
};

/// (banner title, query) pairs
const RUNS: &[(&str, &str)] = &[
    ("Run 1: Direct Answer", "Hello, how are you today?"),
    (
        "Run 2: Tool Use (Weather)",
        "What is the current weather in Loughman, Florida?",
    ),
    (
        "Run 3: Tool Use (Population)",
        "What is the population of New York City?",
    ),
    (
        "Run 4: Tool Use (Capital of France)",
        "What is the capital of France?",
    ),
    (
        "Run 5: Unknown Query (Default Direct Answer)",
        "Tell me a story about a dragon.",
    ),
];

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging()?;

    let tools = ToolRegistry::new().with_tool(SimulatedWebSearchTool::new());
    let agent = Agent::new(
        Arc::new(SimulatedReasoner::new()?),
        tools,
        AgentConfig::from_env()?,
    )?
    .with_console(Console::new());

    for (title, query) in RUNS {
        if let Some(console) = agent.console() {
            console.print_banner(title);
        }
        agent.run(query).await;
    }

    if logging::logs_dir_exists() {
        println!("\nLogs written to logs/agent.log");
    }

    Ok(())
}
