//! Gemini Agent Example
//!
//! Runs the agent loop against the Gemini API with SerpAPI web search.
//! Queries are taken from the command line; with none, a canned set is run.
//! Pass `--interactive` to read questions from stdin instead.
//!
//! Requires `GOOGLE_API_KEY` and `SERPAPI_API_KEY`.
//!
//! Run with: cargo run --example gemini_agent -- "Is it going to rain tonight in Tampa?"
//!       or: cargo run --example gemini_agent -- --interactive

use anyhow::Result;
use std::sync::Arc;

use tooluse_agent::{
    agent::{Agent, AgentConfig},
    cli::Console,
    llm::GeminiProvider,
    logging,
    tools::{SerpApiSearchTool, ToolRegistry},
};

/// Queries run when none are given on the command line
const CANNED_QUERIES: &[&str] = &[
    "What is the current weather in Loughman, Florida?",
    "Is it going to rain tonight in Tampa, Florida?",
    "Hello, how are you today?",
];

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging()?;

    let console = Console::new();

    // --- Step 1: Reasoner and tools from the environment ---
    let llm = match GeminiProvider::from_env() {
        Ok(llm) => llm,
        Err(e) => {
            console.print_error(&format!("{:#}", e));
            return Err(e);
        }
    };
    console.print_system(&format!("Model: {}", llm.model()));

    let search = match SerpApiSearchTool::from_env() {
        Ok(search) => search,
        Err(e) => {
            console.print_error(&format!("{:#}", e));
            return Err(e);
        }
    };

    // --- Step 2: Agent ---
    let agent = Agent::new(
        Arc::new(llm),
        ToolRegistry::new().with_tool(search),
        AgentConfig::from_env()?,
    )?
    .with_console(console);

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--interactive") {
        interactive(&agent).await;
        return Ok(());
    }

    let queries: Vec<&str> = if args.is_empty() {
        CANNED_QUERIES.to_vec()
    } else {
        args.iter().map(String::as_str).collect()
    };

    for (i, query) in queries.iter().enumerate() {
        if let Some(console) = agent.console() {
            console.print_banner(&format!("Run {}", i + 1));
        }
        agent.run(query).await;
    }

    Ok(())
}

/// Answer questions from stdin until `exit`, `quit` or end of input
async fn interactive(agent: &Agent) {
    let Some(console) = agent.console() else {
        return;
    };
    console.print_banner("Tool-use agent (Gemini + SerpAPI)");
    console.print_system("Type a question and press Enter. Type 'exit' or 'quit' to end.");

    loop {
        let input = match console.read_input() {
            Ok(Some(input)) => input,
            Ok(None) => {
                console.println();
                break;
            }
            Err(e) => {
                console.print_error(&format!("Failed to read input: {}", e));
                break;
            }
        };

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            console.print_system("Goodbye!");
            break;
        }
        if input.is_empty() {
            continue;
        }

        agent.run(&input).await;
        console.println();
    }
}
