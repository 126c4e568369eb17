//! Tool registry
//!
//! Maps tool names to implementations. Tools are registered up front and the
//! agent dispatches to them by the name the model asked for.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::tool::{Tool, ToolArgs, ToolError};

/// Registry of the tools available to one agent
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    /// Registration order, used for prompt listing
    order: Vec<String>,
    timeout: Option<Duration>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.register_arc(Arc::new(tool));
    }

    /// Register a shared tool
    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        tracing::debug!("Registering tool: {}", name);
        if self.tools.insert(name.clone(), tool).is_none() {
            self.order.push(name);
        }
    }

    /// Builder-style registration
    pub fn with_tool<T: Tool + 'static>(mut self, tool: T) -> Self {
        self.register(tool);
        self
    }

    /// Bound every invocation by a timeout
    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    /// Check whether a tool with this name is registered
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Names of the registered tools, in registration order
    pub fn tool_names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Prompt signatures of the registered tools, in registration order
    pub fn signatures(&self) -> Vec<String> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.signature())
            .collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry holds no tools
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Invoke a tool by name
    ///
    /// Arguments must match the tool's declared parameters exactly: a missing
    /// or unexpected argument is rejected before the tool runs.
    pub async fn invoke(&self, name: &str, args: &ToolArgs) -> Result<String, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        validate_args(tool.as_ref(), args)?;

        tracing::info!("Invoking tool: {} with args {:?}", name, args);

        let execution = tool.execute(args);
        let result = match self.timeout {
            Some(after) => tokio::time::timeout(after, execution)
                .await
                .map_err(|_| ToolError::Timeout {
                    tool: name.to_string(),
                    after,
                })?,
            None => execution.await,
        };

        result.map_err(|source| ToolError::Execution {
            tool: name.to_string(),
            source: source.into(),
        })
    }
}

fn validate_args(tool: &dyn Tool, args: &ToolArgs) -> Result<(), ToolError> {
    let params = tool.parameters();

    if let Some(missing) = params.iter().find(|p| !args.contains_key(**p)) {
        return Err(ToolError::InvalidArguments {
            tool: tool.name().to_string(),
            reason: format!("missing required argument '{}'", missing),
        });
    }

    if let Some(unexpected) = args.keys().find(|k| !params.contains(&k.as_str())) {
        return Err(ToolError::InvalidArguments {
            tool: tool.name().to_string(),
            reason: format!("unexpected argument '{}'", unexpected),
        });
    }

    Ok(())
}
