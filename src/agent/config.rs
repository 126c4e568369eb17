//! Agent configuration

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Default number of reason/act rounds per run
pub const DEFAULT_MAX_ITERATIONS: usize = 3;

/// Configuration for an [`Agent`](super::Agent)
///
/// Timeouts default to `None`: reasoner and tool calls wait as long as the
/// collaborator takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// Maximum number of reasoner calls in one run
    pub max_iterations: usize,
    /// Bound on each reasoner call
    pub reasoner_timeout: Option<Duration>,
    /// Bound on each tool invocation
    pub tool_timeout: Option<Duration>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            reasoner_timeout: None,
            tool_timeout: None,
        }
    }
}

impl AgentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from the environment
    ///
    /// - `AGENT_MAX_ITERATIONS` (optional, defaults to 3)
    /// - `AGENT_REASONER_TIMEOUT_SECS` (optional)
    /// - `AGENT_TOOL_TIMEOUT_SECS` (optional)
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(value) = env::var("AGENT_MAX_ITERATIONS") {
            config.max_iterations = value
                .parse()
                .with_context(|| format!("Invalid AGENT_MAX_ITERATIONS: {}", value))?;
        }
        config.reasoner_timeout = secs_from_env("AGENT_REASONER_TIMEOUT_SECS")?;
        config.tool_timeout = secs_from_env("AGENT_TOOL_TIMEOUT_SECS")?;

        config.validate()?;
        tracing::info!("Agent config from environment: {:?}", config);
        Ok(config)
    }

    /// Set the maximum number of iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set a timeout for each reasoner call
    pub fn with_reasoner_timeout(mut self, timeout: Duration) -> Self {
        self.reasoner_timeout = Some(timeout);
        self
    }

    /// Set a timeout for each tool invocation
    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = Some(timeout);
        self
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            anyhow::bail!("max_iterations must be a positive integer");
        }
        Ok(())
    }
}

fn secs_from_env(key: &str) -> Result<Option<Duration>> {
    match env::var(key) {
        Ok(value) => {
            let secs: u64 = value
                .parse()
                .with_context(|| format!("Invalid {}: {}", key, value))?;
            Ok(Some(Duration::from_secs(secs)))
        }
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AgentConfig::new();
        assert_eq!(config.max_iterations, 3);
        assert_eq!(config.reasoner_timeout, None);
        assert_eq!(config.tool_timeout, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = AgentConfig::new()
            .with_max_iterations(5)
            .with_reasoner_timeout(Duration::from_secs(30))
            .with_tool_timeout(Duration::from_secs(10));

        assert_eq!(config.max_iterations, 5);
        assert_eq!(config.reasoner_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.tool_timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let err = AgentConfig::new().with_max_iterations(0).validate().unwrap_err();
        assert!(err.to_string().contains("positive"));
    }
}
