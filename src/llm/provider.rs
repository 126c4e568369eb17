//! Reasoner trait
//!
//! A reasoner turns a fully-built prompt into the model's raw text output.
//! The output may be a JSON tool directive or free-form prose; callers must
//! not assume it is well formed.

use anyhow::Result;
use async_trait::async_trait;

/// Capability that produces the next model output for a prompt
#[async_trait]
pub trait Reasoner: Send + Sync {
    /// Get the raw model output for a prompt
    async fn respond(&self, prompt: &str) -> Result<String>;

    /// Name used in logs
    fn name(&self) -> &str;
}
