//! Tool trait definition

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use tracing::debug;

use super::ToolError;
use super::context::ToolContext;

/// A sandboxed operation the agent can call by name
///
/// Implementors report failures through `invoke` as typed errors; `execute`
/// folds both outcomes into the string the agent sees. Nothing a tool does
/// may panic or unwind past this boundary.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Function name the model calls
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Run the tool against `ctx` with the model-supplied arguments
    async fn invoke(&self, input: Value, ctx: &ToolContext) -> Result<String, ToolError>;

    /// Run the tool and render the outcome for the agent
    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!(tool = self.name(), "Tool::execute: called");
        self.invoke(input, ctx).await.into()
    }
}

/// Fetch a required string argument from the model's input object
pub(crate) fn required_str<'a>(input: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    input[key]
        .as_str()
        .ok_or_else(|| ToolError::InvalidArgument(format!("{} is required", key)))
}

/// Result of a tool execution
///
/// `content` is the only thing handed back to the agent. `is_error` exists for
/// logging and CLI exit codes; callers must not parse `content` to tell the two
/// apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub content: String,
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(content: impl Into<String>) -> Self {
        debug!("ToolResult::success: called");
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    /// Create an error result
    pub fn error(content: impl Into<String>) -> Self {
        debug!("ToolResult::error: called");
        Self {
            content: content.into(),
            is_error: true,
        }
    }

    /// Consume the result, keeping only the string for the agent
    pub fn into_content(self) -> String {
        self.content
    }
}

impl From<ToolError> for ToolResult {
    fn from(err: ToolError) -> Self {
        Self::error(format!("Error: {}", err))
    }
}

impl From<Result<String, ToolError>> for ToolResult {
    fn from(result: Result<String, ToolError>) -> Self {
        match result {
            Ok(content) => Self::success(content),
            Err(e) => e.into(),
        }
    }
}

impl fmt::Display for ToolResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}
