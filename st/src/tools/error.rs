//! Tool error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during tool execution
///
/// These never cross the tool boundary: every tool renders them into an
/// error `ToolResult` so the agent gets a readable diagnostic instead.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("working directory {} is not accessible: {source}", root.display())]
    InvalidRoot {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot {verb} \"{path}\" as it is outside the permitted working directory")]
    OutsideWorkdir { verb: &'static str, path: String },

    #[error("\"{path}\" is not a directory")]
    NotADirectory { path: String },

    #[error("File not found or is not a regular file: \"{path}\"")]
    NotAFile { path: String },

    #[error("\"{path}\" is a directory, not a file")]
    IsADirectory { path: String },

    #[error("File \"{path}\" not found.")]
    ScriptNotFound { path: String },

    #[error("\"{path}\" is not a .{extension} file.")]
    NotAScript { path: String, extension: String },

    #[error("{action} \"{path}\": {source}")]
    Io {
        action: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("executing \"{path}\": {source}")]
    Launch {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("executing \"{path}\": timed out after {timeout_ms}ms")]
    Timeout { path: String, timeout_ms: u64 },

    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ToolError {
    /// Wrap an I/O failure with the action and the path it concerned
    pub fn io(action: &'static str, path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
