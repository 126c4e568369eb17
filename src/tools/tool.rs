//! Tool trait definition
//!
//! All tools implement this trait so the registry can dispatch to them by name.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;

/// Keyed string arguments for a tool invocation
pub type ToolArgs = BTreeMap<String, String>;

/// Errors raised when invoking a tool through the registry
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("tool '{0}' is not registered")]
    NotFound(String),

    #[error("invalid arguments for tool '{tool}': {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("tool '{tool}' failed: {source}")]
    Execution {
        tool: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("tool '{tool}' timed out after {after:?}")]
    Timeout { tool: String, after: Duration },
}

/// Trait for tools that the agent can use
///
/// Every declared parameter is a required string argument.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the name of this tool
    fn name(&self) -> &str;

    /// Get a description of this tool
    fn description(&self) -> &str;

    /// Names of the arguments this tool accepts
    fn parameters(&self) -> &[&str];

    /// Execute the tool with the given arguments
    async fn execute(&self, args: &ToolArgs) -> Result<String>;

    /// One-line signature for the instruction prompt, e.g.
    /// `web_search(query: str) - Search the web`
    fn signature(&self) -> String {
        let params = self
            .parameters()
            .iter()
            .map(|p| format!("{}: str", p))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({}) - {}", self.name(), params, self.description())
    }
}
