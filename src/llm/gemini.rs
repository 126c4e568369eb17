//! Google Gemini API client
//!
//! Direct HTTP client for the Generative Language `generateContent` endpoint.
//!
//! # Authentication
//!
//! Uses a Google API key (set via `GOOGLE_API_KEY` environment variable or passed directly).
//!
//! ```ignore
//! // From environment variables
//! let llm = GeminiProvider::from_env()?;
//!
//! // With explicit API key
//! let llm = GeminiProvider::new("AIza...")?.with_model("gemini-1.5-flash-latest");
//! ```

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use super::provider::Reasoner;

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
const DEFAULT_TEMPERATURE: f32 = 0.7;

// ============================================================================
// Gemini request/response types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

// ============================================================================
// GeminiProvider
// ============================================================================

/// Gemini reasoner
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    temperature: f32,
    api_base: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider from environment variables
    ///
    /// Reads from:
    /// - `GOOGLE_API_KEY` (required)
    /// - `GEMINI_MODEL` (optional, defaults to gemini-1.5-flash-latest)
    /// - `GEMINI_TEMPERATURE` (optional, defaults to 0.7)
    /// - `GEMINI_BASE_URL` (optional, defaults to the public API)
    pub fn from_env() -> Result<Self> {
        tracing::info!("Creating Gemini provider from environment");

        let api_key = env::var("GOOGLE_API_KEY").context(
            "GOOGLE_API_KEY environment variable not set. \
            Get your API key from https://aistudio.google.com/",
        )?;

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let temperature = env::var("GEMINI_TEMPERATURE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TEMPERATURE);

        let mut provider = Self::new(api_key)?
            .with_model(model)
            .with_temperature(temperature);

        if let Ok(url) = env::var("GEMINI_BASE_URL") {
            tracing::info!("Using custom base URL: {}", url);
            provider = provider.with_base_url(url);
        }

        tracing::info!("Using model: {}", provider.model);
        tracing::info!("Temperature: {}", provider.temperature);

        Ok(provider)
    }

    /// Create a new Gemini provider with a specific API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Set the model to use
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        // Accept both "gemini-pro" and "models/gemini-pro"
        self.model = model
            .strip_prefix("models/")
            .map(String::from)
            .unwrap_or(model);
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base = base_url.into();
        self
    }

    /// Bound each HTTP request by a timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: Some(GenerationConfig {
                temperature: self.temperature,
            }),
        }
    }

    /// Send a generateContent request and return the first candidate's text
    async fn generate_content(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        );

        let request = self.build_request(prompt);
        tracing::debug!("[Gemini] Prompt length: {} chars", prompt.len());

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read Gemini response body")?;

        tracing::debug!("[Gemini] Response status: {}", status);
        tracing::debug!("[Gemini] Response body: {}", response_text);

        if !status.is_success() {
            tracing::error!("[Gemini] API error: {} - {}", status, response_text);
            anyhow::bail!("Gemini API error ({}): {}", status, response_text);
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&response_text)
            .context("Failed to parse Gemini API response")?;

        extract_text(parsed)
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("Gemini response contained no candidates"))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        anyhow::bail!(
            "Gemini response contained no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        );
    }

    Ok(text)
}

#[async_trait]
impl Reasoner for GeminiProvider {
    async fn respond(&self, prompt: &str) -> Result<String> {
        tracing::info!("[Gemini] Sending prompt to {}", self.model);
        self.generate_content(prompt).await
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
