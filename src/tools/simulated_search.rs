//! Simulated web search
//!
//! Answers a handful of known queries from a fixed table so the agent can be
//! exercised without network access or API keys.

use anyhow::Result;
use async_trait::async_trait;

use super::tool::{Tool, ToolArgs};

/// Canned answers keyed by a lowercase phrase the query must contain
const CANNED_RESULTS: &[(&str, &str)] = &[
    (
        "current weather in loughman, florida",
        "The current weather in Loughman, Florida is partly cloudy with a temperature of 85°F (29°C) and high humidity.",
    ),
    (
        "population of new york city",
        "The estimated population of New York City in 2023 was around 8.3 million people.",
    ),
    ("capital of france", "The capital of France is Paris."),
];

/// Offline stand-in for a web search tool
#[derive(Debug, Default, Clone)]
pub struct SimulatedWebSearchTool;

impl SimulatedWebSearchTool {
    pub fn new() -> Self {
        Self
    }

    /// Look up the canned result for a query
    pub fn lookup(query: &str) -> String {
        let lowered = query.to_lowercase();
        CANNED_RESULTS
            .iter()
            .find(|(phrase, _)| lowered.contains(phrase))
            .map(|(_, result)| result.to_string())
            .unwrap_or_else(|| {
                format!(
                    "Simulated search result for '{}': Information about this specific query is not readily available in this simulation.",
                    query
                )
            })
    }
}

#[async_trait]
impl Tool for SimulatedWebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Use this for general knowledge queries or to get current information."
    }

    fn parameters(&self) -> &[&str] {
        &["query"]
    }

    async fn execute(&self, args: &ToolArgs) -> Result<String> {
        let query = args
            .get("query")
            .ok_or_else(|| anyhow::anyhow!("'query' argument is required"))?;

        tracing::info!("Simulated web search for: {}", query);
        Ok(Self::lookup(query))
    }
}
