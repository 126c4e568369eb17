//! Simulated reasoner
//!
//! Keyword-driven stand-in for a real model. It decides to call `web_search`
//! for a few known topics, answers greetings directly, and turns a tool
//! re-prompt into a prose answer.

use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use serde_json::json;

use super::provider::Reasoner;

const GREETING: &str = "Hello! I am a helpful AI agent. How can I assist you today?";
const DEFAULT_ANSWER: &str =
    "I can try to answer your question or use a tool if necessary. What would you like to know?";

/// A topic that makes the reasoner ask for a web search
struct SearchTopic {
    /// Lowercase phrases that must all appear in the prompt
    phrases: &'static [&'static str],
    query: &'static str,
}

const SEARCH_TOPICS: &[SearchTopic] = &[
    SearchTopic {
        phrases: &["current weather", "loughman, florida"],
        query: "current weather in Loughman, Florida",
    },
    SearchTopic {
        phrases: &["population of new york city"],
        query: "population of New York City",
    },
    SearchTopic {
        phrases: &["capital of france"],
        query: "capital of France",
    },
];

/// Offline reasoner with canned decisions
pub struct SimulatedReasoner {
    reprompt: Regex,
}

impl SimulatedReasoner {
    pub fn new() -> Result<Self> {
        // Matches the re-prompt built after a tool call
        let reprompt = Regex::new(r"(?s)Based on the tool output: '(.*)', what is the answer")
            .context("Failed to compile re-prompt pattern")?;
        Ok(Self { reprompt })
    }

    fn decide(&self, prompt: &str) -> String {
        if let Some(caps) = self.reprompt.captures(prompt) {
            return format!("Here is what I found: {}", &caps[1]);
        }

        let lowered = prompt.to_lowercase();

        for topic in SEARCH_TOPICS {
            if topic.phrases.iter().all(|p| lowered.contains(p)) {
                return json!({
                    "tool_name": "web_search",
                    "tool_args": {"query": topic.query}
                })
                .to_string();
            }
        }

        if lowered.contains("hello") || lowered.contains("how are you") {
            return GREETING.to_string();
        }

        DEFAULT_ANSWER.to_string()
    }
}

#[async_trait]
impl Reasoner for SimulatedReasoner {
    async fn respond(&self, prompt: &str) -> Result<String> {
        let output = self.decide(prompt);
        tracing::debug!("Simulated reasoner output: {}", output);
        Ok(output)
    }

    fn name(&self) -> &str {
        "simulated"
    }
}
