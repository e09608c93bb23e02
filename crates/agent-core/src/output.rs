//! Agent output types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Record of one tool call made while an agent produced its answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Call ID assigned by the completion backend
    pub id: String,
    /// Tool name
    pub name: String,
    /// Arguments the model supplied
    pub input: Value,
    /// Value handed back to the model
    pub output: Value,
    /// Whether the tool itself returned an error (as opposed to an error payload)
    pub failed: bool,
}

impl ToolInvocation {
    /// Error message carried by this call, if any
    ///
    /// Covers both hard failures and tools that report failures in-band as an
    /// `{"error": "..."}` payload.
    pub fn reported_error(&self) -> Option<&str> {
        if self.failed {
            return Some(self.output.as_str().unwrap_or("tool execution failed"));
        }
        self.output.get("error").and_then(Value::as_str)
    }
}

/// Final text of an agent invocation plus the tool calls made along the way
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentOutput {
    /// Final answer text
    pub text: String,
    /// Tool calls in the order they were executed
    #[serde(default)]
    pub tool_calls: Vec<ToolInvocation>,
}

impl AgentOutput {
    /// Output without any tool calls
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tool_calls: Vec::new(),
        }
    }

    /// Attach the tool calls made while producing this output
    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolInvocation>) -> Self {
        self.tool_calls = tool_calls;
        self
    }

    /// Tool calls that failed or returned an error payload
    pub fn tool_errors(&self) -> impl Iterator<Item = &ToolInvocation> {
        self.tool_calls
            .iter()
            .filter(|call| call.reported_error().is_some())
    }
}
