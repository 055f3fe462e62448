//! run_python_file tool - execute a script inside the working directory

use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::config::ScriptConfig;
use crate::tools::traits::required_str;
use crate::tools::{Tool, ToolContext, ToolError, ToolResult};

/// Captured result of a script that ran to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl ExecutionOutcome {
    /// Render the labeled sections handed back to the agent
    pub fn render(&self) -> String {
        let mut sections = Vec::new();
        if !self.stdout.is_empty() {
            sections.push(format!("STDOUT:\n{}", self.stdout));
        }
        if !self.stderr.is_empty() {
            sections.push(format!("STDERR:\n{}", self.stderr));
        }
        if self.exit_code != 0 {
            sections.push(format!("Process exited with code {}", self.exit_code));
        }

        if sections.is_empty() {
            "No output produced.".to_string()
        } else {
            sections.join("\n")
        }
    }
}

/// Run a script under the configured interpreter with a wall-clock limit
pub struct RunScriptTool {
    config: ScriptConfig,
}

impl RunScriptTool {
    pub fn new(config: ScriptConfig) -> Self {
        debug!(?config, "RunScriptTool::new: called");
        Self { config }
    }

    /// Execute `file_path` (relative to the working root) with `args`
    ///
    /// The child runs with the working root as its cwd. A non-zero exit code
    /// is reported in the output, not treated as a failure.
    pub async fn run(&self, ctx: &ToolContext, file_path: &str, args: &[String]) -> ToolResult {
        debug!(%file_path, ?args, "RunScriptTool::run: called");
        self.try_run(ctx, file_path, args).await.into()
    }

    async fn try_run(&self, ctx: &ToolContext, file_path: &str, args: &[String]) -> Result<String, ToolError> {
        let full_path = ctx.validate_path(file_path, "execute")?;
        let root = ctx.canonical_root()?;

        if !tokio::fs::try_exists(&full_path).await.unwrap_or(false) {
            debug!(?full_path, "RunScriptTool::try_run: script not found");
            return Err(ToolError::ScriptNotFound {
                path: file_path.to_string(),
            });
        }

        // The name as given, not the symlink target
        if !file_path.ends_with(&format!(".{}", self.config.extension)) {
            debug!(%file_path, "RunScriptTool::try_run: wrong extension");
            return Err(ToolError::NotAScript {
                path: file_path.to_string(),
                extension: self.config.extension.clone(),
            });
        }

        let outcome = self.spawn_and_collect(&full_path, file_path, args, &root).await?;
        Ok(outcome.render())
    }

    async fn spawn_and_collect(
        &self,
        script: &Path,
        file_path: &str,
        args: &[String],
        root: &Path,
    ) -> Result<ExecutionOutcome, ToolError> {
        let interpreter = self.config.resolve_interpreter();
        debug!(?interpreter, ?script, timeout_ms = self.config.timeout_ms, "RunScriptTool::spawn_and_collect: spawning");

        let mut command = Command::new(&interpreter);
        command
            .arg(script)
            .args(args)
            .current_dir(root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Own process group so a timeout can take down every descendant
        #[cfg(unix)]
        {
            command.process_group(0);
        }

        let mut child = command.spawn().map_err(|source| {
            warn!(?interpreter, error = %source, "Failed to launch script");
            ToolError::Launch {
                path: file_path.to_string(),
                source,
            }
        })?;
        // The child leads its group, so its pid names the group even after it is reaped
        let pgid = child.id();

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        // Exit and EOF on both pipes must all land inside the time limit
        let collected = tokio::time::timeout(self.config.timeout(), async {
            let (status, out, err) = tokio::join!(child.wait(), read_pipe(stdout), read_pipe(stderr));
            Ok::<_, std::io::Error>((status?, out?, err?))
        })
        .await;

        match collected {
            Ok(Ok((status, stdout, stderr))) => {
                let exit_code = status.code().unwrap_or(-1);
                debug!(exit_code, stdout_len = stdout.len(), stderr_len = stderr.len(), "RunScriptTool::spawn_and_collect: completed");
                Ok(ExecutionOutcome {
                    stdout,
                    stderr,
                    exit_code,
                })
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Failed to collect script output");
                terminate(&mut child, pgid).await;
                Err(ToolError::io("collecting output of", file_path, e))
            }
            Err(_) => {
                info!(%file_path, timeout_ms = self.config.timeout_ms, "Script timed out, killing process group");
                terminate(&mut child, pgid).await;
                Err(ToolError::Timeout {
                    path: file_path.to_string(),
                    timeout_ms: self.config.timeout_ms,
                })
            }
        }
    }
}

impl Default for RunScriptTool {
    fn default() -> Self {
        Self::new(ScriptConfig::default())
    }
}

async fn read_pipe<R: AsyncRead + Unpin>(pipe: Option<R>) -> std::io::Result<String> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).await?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Kill the process group `pgid`, then kill and reap the child itself
///
/// The group is signalled even when the child has already exited, since
/// descendants still holding its pipes keep the group alive.
async fn terminate(child: &mut Child, pgid: Option<u32>) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{Signal, killpg};
        use nix::unistd::Pid;

        if let Some(pgid) = pgid
            && let Err(e) = killpg(Pid::from_raw(pgid as i32), Signal::SIGKILL)
        {
            debug!(pgid, %e, "terminate: killpg failed");
        }
    }
    #[cfg(not(unix))]
    let _ = pgid;

    if let Err(e) = child.kill().await {
        debug!(%e, "terminate: kill failed");
    }
}

#[async_trait]
impl Tool for RunScriptTool {
    fn name(&self) -> &'static str {
        "run_python_file"
    }

    fn description(&self) -> &'static str {
        "Executes a script file with optional arguments and returns its output, constrained to the working directory."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "Path of the script to execute, relative to the working directory."
                },
                "args": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Optional positional arguments passed to the script."
                }
            },
            "required": ["file_path"]
        })
    }

    async fn invoke(&self, input: Value, ctx: &ToolContext) -> Result<String, ToolError> {
        debug!(?input, "RunScriptTool::invoke: called");
        let file_path = required_str(&input, "file_path")?;

        let args: Option<Vec<String>> = match &input["args"] {
            Value::Null => Some(Vec::new()),
            Value::Array(items) => items.iter().map(|v| v.as_str().map(String::from)).collect(),
            _ => None,
        };
        let Some(args) = args else {
            debug!("RunScriptTool::invoke: malformed args parameter");
            return Err(ToolError::InvalidArgument("args must be an array of strings".to_string()));
        };

        self.try_run(ctx, file_path, &args).await
    }
}
