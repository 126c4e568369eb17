//! Web search tool using SerpAPI
//!
//! Runs a Google search through SerpAPI and returns the snippets of the top
//! organic results as plain text.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::tool::{Tool, ToolArgs};

/// Default timeout in milliseconds (30 seconds)
const DEFAULT_TIMEOUT_MS: u64 = 30000;
/// SerpAPI base URL
const SERPAPI_BASE_URL: &str = "https://serpapi.com";
/// Number of organic results whose snippets are returned
const SNIPPET_COUNT: usize = 3;

/// Web search tool backed by SerpAPI
pub struct SerpApiSearchTool {
    /// API key for SerpAPI
    api_key: String,
    /// Base URL, overridable for testing
    base_url: String,
    /// HTTP client
    client: reqwest::Client,
}

/// SerpAPI search response (only the fields we read)
#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<SerpApiOrganicResult>,
}

#[derive(Debug, Deserialize)]
struct SerpApiOrganicResult {
    snippet: Option<String>,
}

impl SerpApiSearchTool {
    /// Create a new search tool
    ///
    /// The API key is read from the SERPAPI_API_KEY environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("SERPAPI_API_KEY").map_err(|_| {
            anyhow::anyhow!(
                "SERPAPI_API_KEY environment variable not set. \
                Get your API key from https://serpapi.com/"
            )
        })?;

        Self::with_api_key(api_key)
    }

    /// Create a new search tool with an explicit API key
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(DEFAULT_TIMEOUT_MS))
            .build()?;

        Ok(Self {
            api_key: api_key.into(),
            base_url: SERPAPI_BASE_URL.to_string(),
            client,
        })
    }

    /// Point the tool at a different SerpAPI-compatible host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Search and return the joined snippets of the top results
    pub async fn search(&self, query: &str) -> Result<String> {
        tracing::info!("Searching SerpAPI: {}", query);

        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("api_key", self.api_key.as_str())])
            .send()
            .await
            .context("Failed to send request to SerpAPI")?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("SerpAPI error status: {}", status);
            anyhow::bail!(
                "Failed to fetch from SerpAPI. Status code: {}",
                status.as_u16()
            );
        }

        let body: SerpApiResponse = response
            .json()
            .await
            .context("Failed to parse SerpAPI response")?;

        let text = body
            .organic_results
            .iter()
            .take(SNIPPET_COUNT)
            .map(|r| r.snippet.as_deref().unwrap_or(""))
            .collect::<Vec<_>>()
            .join(" ");

        tracing::debug!("Search completed, {} chars of snippets", text.len());

        Ok(text)
    }
}

#[async_trait]
impl Tool for SerpApiSearchTool {
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

        self.search(query).await
    }
}
