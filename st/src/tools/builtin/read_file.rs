//! get_file_content tool - read a file up to a character budget

use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use crate::config::DEFAULT_MAX_CHARS;
use crate::tools::traits::required_str;
use crate::tools::{Tool, ToolContext, ToolError, ToolResult};

/// Widest UTF-8 encoding of a single char
const MAX_UTF8_WIDTH: usize = 4;

/// Read a file's contents, truncated at `max_chars` characters
pub struct ReadFileTool {
    max_chars: usize,
}

impl ReadFileTool {
    pub fn new(max_chars: usize) -> Self {
        debug!(max_chars, "ReadFileTool::new: called");
        Self { max_chars }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Read `file_path` (relative to the working root)
    ///
    /// At most `max_chars` characters come back. When the file holds more,
    /// a notice naming the file and the budget is appended after them.
    pub async fn read(&self, ctx: &ToolContext, file_path: &str) -> ToolResult {
        debug!(%file_path, "ReadFileTool::read: called");
        self.try_read(ctx, file_path).await.into()
    }

    async fn try_read(&self, ctx: &ToolContext, file_path: &str) -> Result<String, ToolError> {
        let full_path = ctx.validate_path(file_path, "read")?;

        let size = match tokio::fs::metadata(&full_path).await {
            Ok(m) if m.is_file() => m.len(),
            _ => {
                debug!(?full_path, "ReadFileTool::try_read: missing or not a regular file");
                return Err(ToolError::NotAFile {
                    path: file_path.to_string(),
                });
            }
        };

        let (mut content, bytes_read) = read_prefix(&full_path, self.max_chars)
            .await
            .map_err(|e| ToolError::io("reading file", file_path, e))?;

        let char_count = content.chars().count();
        let truncated = char_count > self.max_chars || size > bytes_read;
        debug!(size, bytes_read, char_count, truncated, "ReadFileTool::try_read: file read");

        if truncated {
            if let Some((idx, _)) = content.char_indices().nth(self.max_chars) {
                content.truncate(idx);
            }
            info!(%file_path, max_chars = self.max_chars, "File content truncated");
            content.push_str(&format!(
                "[...File \"{}\" truncated at {} characters]",
                file_path, self.max_chars
            ));
        }

        Ok(content)
    }
}

impl Default for ReadFileTool {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHARS)
    }
}

/// Read just enough bytes to cover `max_chars` characters
///
/// Returns the lossily decoded text and how many bytes were consumed.
async fn read_prefix(path: &Path, max_chars: usize) -> std::io::Result<(String, u64)> {
    let limit = max_chars.saturating_mul(MAX_UTF8_WIDTH) as u64;
    let file = tokio::fs::File::open(path).await?;

    let mut buf = Vec::new();
    file.take(limit).read_to_end(&mut buf).await?;

    let bytes_read = buf.len() as u64;
    Ok((String::from_utf8_lossy(&buf).into_owned(), bytes_read))
}

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &'static str {
        "get_file_content"
    }

    fn description(&self) -> &'static str {
        "Reads the contents of a file, truncated to a fixed character limit, constrained to the working directory."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "Path of the file to read, relative to the working directory."
                }
            },
            "required": ["file_path"]
        })
    }

    async fn invoke(&self, input: Value, ctx: &ToolContext) -> Result<String, ToolError> {
        debug!(?input, "ReadFileTool::invoke: called");
        let file_path = required_str(&input, "file_path")?;
        self.try_read(ctx, file_path).await
    }
}
