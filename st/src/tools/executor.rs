//! ToolExecutor - dispatches agent tool calls by name

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::config::ToolsConfig;

use super::builtin::{ListDirectoryTool, ReadFileTool, RunScriptTool, WriteFileTool};
use super::{Tool, ToolContext, ToolError, ToolResult};

/// A tool invocation requested by the agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub input: Value,
}

/// Function declaration handed to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Registry of the tools available to an agent
pub struct ToolExecutor {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolExecutor {
    /// Create executor with the builtin tools configured from `config`
    pub fn from_config(config: &ToolsConfig) -> Self {
        debug!(?config, "ToolExecutor::from_config: called");
        let mut executor = Self::empty();

        executor.add_tool(Box::new(ListDirectoryTool));
        executor.add_tool(Box::new(ReadFileTool::new(config.max_chars)));
        executor.add_tool(Box::new(WriteFileTool));
        executor.add_tool(Box::new(RunScriptTool::new(config.script.clone())));

        executor
    }

    /// Create executor with standard tools and default limits
    pub fn standard() -> Self {
        Self::from_config(&ToolsConfig::default())
    }

    /// Create an empty executor (for testing)
    pub fn empty() -> Self {
        Self { tools: HashMap::new() }
    }

    /// Add a tool to the executor
    pub fn add_tool(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get tool definitions for the model, sorted by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> = self
            .tools
            .values()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.input_schema(),
            })
            .collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Execute a tool call
    pub async fn execute(&self, tool_call: &ToolCall, ctx: &ToolContext) -> ToolResult {
        debug!(id = %tool_call.id, name = %tool_call.name, "ToolExecutor::execute: called");
        let result = match self.tools.get(&tool_call.name) {
            Some(tool) => tool.execute(tool_call.input.clone(), ctx).await,
            None => ToolError::UnknownTool {
                name: tool_call.name.clone(),
            }
            .into(),
        };

        if result.is_error {
            warn!(name = %tool_call.name, content = %result.content, "Tool call failed");
        }
        result
    }

    /// Execute multiple tool calls in order
    pub async fn execute_all(&self, tool_calls: &[ToolCall], ctx: &ToolContext) -> Vec<(String, ToolResult)> {
        let mut results = Vec::with_capacity(tool_calls.len());

        for call in tool_calls {
            let result = self.execute(call, ctx).await;
            results.push((call.id.clone(), result));
        }

        results
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get tool names
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }
}

impl Default for ToolExecutor {
    fn default() -> Self {
        Self::standard()
    }
}
