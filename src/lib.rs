//! Bounded tool-use agent
//!
//! An [`Agent`](agent::Agent) asks a [`Reasoner`](llm::Reasoner) how to answer a
//! query. The reasoner either answers in prose or emits a JSON tool call,
//! which the agent dispatches through a [`ToolRegistry`](tools::ToolRegistry),
//! feeds back, and re-prompts on, for at most a fixed number of rounds.
//!
//! ```ignore
//! let agent = Agent::new(
//!     Arc::new(SimulatedReasoner::new()?),
//!     ToolRegistry::new().with_tool(SimulatedWebSearchTool::new()),
//!     AgentConfig::default(),
//! )?;
//! let outcome = agent.run("What is the capital of France?").await;
//! println!("{}", outcome.answer);
//! ```

pub mod agent;
pub mod cli;
pub mod conversation;
pub mod llm;
pub mod logging;
pub mod tools;

pub use agent::{Agent, AgentConfig, AgentOutcome, StopReason};
