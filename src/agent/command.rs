//! Classification of raw model output
//!
//! The model is asked to reply either with prose or with a JSON tool
//! directive. Its output is untrusted, so parsing never fails: anything that
//! is not a well-shaped directive is a direct answer.

use serde_json::Value;

use crate::tools::ToolArgs;

/// What the model asked the agent to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelCommand {
    /// Invoke a tool. The name may be empty; the agent rejects that.
    ToolCall { tool_name: String, tool_args: ToolArgs },
    /// Final answer text
    DirectAnswer(String),
}

impl ModelCommand {
    /// Classify model output
    ///
    /// A tool call is a JSON object with a string `tool_name` and an optional
    /// object `tool_args`. Non-string argument values are kept as their JSON text.
    pub fn parse(output: &str) -> Self {
        match parse_tool_call(output) {
            Some((tool_name, tool_args)) => Self::ToolCall {
                tool_name,
                tool_args,
            },
            None => Self::DirectAnswer(output.to_string()),
        }
    }
}

fn parse_tool_call(output: &str) -> Option<(String, ToolArgs)> {
    let value: Value = serde_json::from_str(output).ok()?;
    let object = value.as_object()?;

    let tool_name = object.get("tool_name")?.as_str()?.to_string();

    let tool_args = match object.get("tool_args") {
        None | Some(Value::Null) => ToolArgs::new(),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(k, v)| {
                let v = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), v)
            })
            .collect(),
        Some(_) => return None,
    };

    Some((tool_name, tool_args))
}
