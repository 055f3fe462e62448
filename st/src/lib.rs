//! sandbox-tools - working-directory sandboxed tools for LLM agents
//!
//! An agent loop gets four tools: list a directory, read a file, write a
//! file, and run a script. Every path is resolved against a single working
//! directory and rejected if it escapes it. Every outcome, success or
//! failure, comes back as one human-readable string.
//!
//! # Modules
//!
//! - [`tools`] - Containment checks, builtin tools, and name-based dispatch
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface for driving the tools by hand

pub mod cli;
pub mod config;
pub mod tools;

// Re-export commonly used types
pub use config::{Config, ScriptConfig, ToolsConfig};
pub use tools::builtin::{ExecutionOutcome, ListDirectoryTool, ReadFileTool, RunScriptTool, WriteFileTool};
pub use tools::{Tool, ToolCall, ToolContext, ToolDefinition, ToolError, ToolExecutor, ToolResult};
