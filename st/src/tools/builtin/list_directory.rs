//! get_files_info tool - list directory entries with size metadata

use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::tools::{Tool, ToolContext, ToolError, ToolResult};

/// List the immediate children of a directory
pub struct ListDirectoryTool;

impl ListDirectoryTool {
    /// List `directory` (relative to the working root)
    ///
    /// One line per entry, sorted by name. Directories report size 0. Any
    /// failure while enumerating discards the partial listing.
    pub async fn list(&self, ctx: &ToolContext, directory: &str) -> ToolResult {
        debug!(%directory, "ListDirectoryTool::list: called");
        self.try_list(ctx, directory).await.into()
    }

    async fn try_list(&self, ctx: &ToolContext, directory: &str) -> Result<String, ToolError> {
        let full_path = ctx.validate_path(directory, "list")?;

        if !tokio::fs::metadata(&full_path).await.is_ok_and(|m| m.is_dir()) {
            debug!(?full_path, "ListDirectoryTool::try_list: not a directory");
            return Err(ToolError::NotADirectory {
                path: directory.to_string(),
            });
        }

        let mut entries = collect_entries(&full_path)
            .await
            .map_err(|e| ToolError::io("listing files in", directory, e))?;

        entries.sort_by(|a, b| a.0.cmp(&b.0));
        debug!(entries_count = %entries.len(), "ListDirectoryTool::try_list: entries collected");

        let lines: Vec<String> = entries
            .into_iter()
            .map(|(name, size, is_dir)| format!("- {}: file_size={} bytes, is_dir={}", name, size, is_dir))
            .collect();

        Ok(lines.join("\n"))
    }
}

/// Name, byte size and directory flag of every entry, without following symlinks
async fn collect_entries(dir: &Path) -> std::io::Result<Vec<(String, u64, bool)>> {
    let mut entries = Vec::new();
    let mut reader = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = reader.next_entry().await? {
        let name = entry.file_name().to_string_lossy().to_string();
        let metadata = entry.metadata().await?;
        let is_dir = metadata.is_dir();
        let size = if is_dir { 0 } else { metadata.len() };
        entries.push((name, size, is_dir));
    }

    Ok(entries)
}

#[async_trait]
impl Tool for ListDirectoryTool {
    fn name(&self) -> &'static str {
        "get_files_info"
    }

    fn description(&self) -> &'static str {
        "Lists files in the specified directory along with their sizes, constrained to the working directory."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "directory": {
                    "type": "string",
                    "description": "The directory to list files from, relative to the working directory. If not provided, lists files in the working directory itself."
                }
            }
        })
    }

    async fn invoke(&self, input: Value, ctx: &ToolContext) -> Result<String, ToolError> {
        debug!(?input, "ListDirectoryTool::invoke: called");
        let directory = input["directory"].as_str().unwrap_or(".");
        self.try_list(ctx, directory).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_list_directory_file_and_subdir() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("main.py"), "print('hi')\n").unwrap();
        fs::create_dir(temp.path().join("pkg")).unwrap();

        let ctx = ToolContext::new(temp.path());
        let result = ListDirectoryTool.list(&ctx, ".").await;

        assert!(!result.is_error);
        assert_eq!(
            result.content,
            "- main.py: file_size=12 bytes, is_dir=false\n- pkg: file_size=0 bytes, is_dir=true"
        );
    }

    #[tokio::test]
    async fn test_list_directory_sorted() {
        let temp = tempdir().unwrap();
        for name in ["zeta.txt", "alpha.txt", "mid.txt"] {
            fs::write(temp.path().join(name), "").unwrap();
        }

        let ctx = ToolContext::new(temp.path());
        let result = ListDirectoryTool.list(&ctx, ".").await;

        let names: Vec<&str> = result
            .content
            .lines()
            .map(|l| l.trim_start_matches("- ").split(':').next().unwrap())
            .collect();
        assert_eq!(names, vec!["alpha.txt", "mid.txt", "zeta.txt"]);
    }

    #[tokio::test]
    async fn test_list_directory_empty() {
        let temp = tempdir().unwrap();
        let ctx = ToolContext::new(temp.path());

        let result = ListDirectoryTool.list(&ctx, ".").await;

        assert!(!result.is_error);
        assert_eq!(result.content, "");
    }

    #[tokio::test]
    async fn test_list_directory_nested() {
        let temp = tempdir().unwrap();
        let subdir = temp.path().join("pkg");
        fs::create_dir(&subdir).unwrap();
        fs::write(subdir.join("calc.py"), "x = 1").unwrap();

        let ctx = ToolContext::new(temp.path());
        let result = ListDirectoryTool
            .execute(serde_json::json!({"directory": "pkg"}), &ctx)
            .await;

        assert!(!result.is_error);
        assert_eq!(result.content, "- calc.py: file_size=5 bytes, is_dir=false");
    }

    #[tokio::test]
    async fn test_list_directory_not_a_directory() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("main.py"), "").unwrap();
        let ctx = ToolContext::new(temp.path());

        let missing = ListDirectoryTool.list(&ctx, "nonexistent").await;
        assert!(missing.is_error);
        assert_eq!(missing.content, "Error: \"nonexistent\" is not a directory");

        let file = ListDirectoryTool.list(&ctx, "main.py").await;
        assert!(file.is_error);
        assert!(file.content.contains("is not a directory"));
    }

    #[tokio::test]
    async fn test_list_directory_outside_root() {
        let temp = tempdir().unwrap();
        let ctx = ToolContext::new(temp.path());

        let result = ListDirectoryTool.list(&ctx, "../").await;

        assert!(result.is_error);
        assert_eq!(
            result.content,
            "Error: Cannot list \"../\" as it is outside the permitted working directory"
        );
    }

    #[tokio::test]
    async fn test_execute_defaults_to_root() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.txt"), "abc").unwrap();
        let ctx = ToolContext::new(temp.path());

        let result = ListDirectoryTool.execute(serde_json::json!({}), &ctx).await;

        assert_eq!(result.content, "- a.txt: file_size=3 bytes, is_dir=false");
    }
}
