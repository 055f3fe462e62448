//! write_file tool - write content to a file

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::tools::traits::required_str;
use crate::tools::{Tool, ToolContext, ToolError, ToolResult};

/// Write content to a file, replacing whatever was there
pub struct WriteFileTool;

impl WriteFileTool {
    /// Write `content` to `file_path` (relative to the working root)
    ///
    /// Missing parent directories are created. An existing directory at the
    /// target is left untouched.
    pub async fn write(&self, ctx: &ToolContext, file_path: &str, content: &str) -> ToolResult {
        debug!(%file_path, content_len = content.len(), "WriteFileTool::write: called");
        self.try_write(ctx, file_path, content).await.into()
    }

    async fn try_write(&self, ctx: &ToolContext, file_path: &str, content: &str) -> Result<String, ToolError> {
        let full_path = ctx.validate_path(file_path, "write to")?;

        match tokio::fs::metadata(&full_path).await {
            Ok(m) if m.is_dir() => {
                debug!(?full_path, "WriteFileTool::try_write: target is a directory");
                return Err(ToolError::IsADirectory {
                    path: file_path.to_string(),
                });
            }
            Ok(_) => debug!("WriteFileTool::try_write: overwriting existing file"),
            Err(_) => {
                if let Some(parent) = full_path.parent() {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(|e| ToolError::io("creating directories for", file_path, e))?;
                    debug!(?parent, "WriteFileTool::try_write: parent directories ensured");
                }
            }
        }

        tokio::fs::write(&full_path, content)
            .await
            .map_err(|e| ToolError::io("writing to file", file_path, e))?;

        let chars = content.chars().count();
        debug!(chars, "WriteFileTool::try_write: file written successfully");
        Ok(format!("Successfully wrote to \"{}\" ({} characters written)", file_path, chars))
    }
}

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &'static str {
        "write_file"
    }

    fn description(&self) -> &'static str {
        "Writes content to a file, creating parent directories if needed and overwriting any existing content, constrained to the working directory."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "Path of the file to write, relative to the working directory."
                },
                "content": {
                    "type": "string",
                    "description": "Content to write to the file."
                }
            },
            "required": ["file_path", "content"]
        })
    }

    async fn invoke(&self, input: Value, ctx: &ToolContext) -> Result<String, ToolError> {
        debug!(?input, "WriteFileTool::invoke: called");
        let file_path = required_str(&input, "file_path")?;
        let content = required_str(&input, "content")?;
        self.try_write(ctx, file_path, content).await
    }
}
