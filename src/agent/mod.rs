pub mod agent_loop;
pub mod command;
pub mod config;
pub mod outcome;
pub mod prompt;

pub use agent_loop::{Agent, REASONER_ERROR_ANSWER};
pub use command::ModelCommand;
pub use config::{AgentConfig, DEFAULT_MAX_ITERATIONS};
pub use outcome::{AgentOutcome, StopReason};
