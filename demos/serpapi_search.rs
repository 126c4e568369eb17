//! SerpAPI search check
//!
//! Performs one search and prints the joined snippets of the top results.
//!
//! Run with: cargo run --example serpapi_search -- "is it going to rain tonight?"

use anyhow::Result;
use tooluse_agent::tools::SerpApiSearchTool;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("serpapi_search=info,tooluse_agent=info")
        .init();

    let query = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "is it going to rain tonight in my location?".to_string());

    let tool = SerpApiSearchTool::from_env()?;

    println!("=== SerpAPI Search ===");
    println!("Query: {}\n", query);

    let results_text = tool.search(&query).await?;
    println!("results_text : {}", results_text);

    Ok(())
}
