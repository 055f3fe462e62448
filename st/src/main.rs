//! st - sandbox-tools command-line driver
//!
//! Runs a single tool against a working directory and prints the result
//! string exactly as an agent would receive it.

use std::fs;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use sandbox_tools::cli::{Cli, Command, get_log_dir, get_log_path};
use sandbox_tools::config::Config;
use sandbox_tools::tools::builtin::{ListDirectoryTool, ReadFileTool, RunScriptTool, WriteFileTool};
use sandbox_tools::tools::{ToolCall, ToolContext, ToolExecutor, ToolResult};

fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = get_log_dir();
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Write to log file, not stdout/stderr - stdout carries the tool result
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(get_log_path()).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(
        "Loaded config: max_chars={}, script_extension={}, timeout_ms={}",
        config.tools.max_chars, config.tools.script.extension, config.tools.script.timeout_ms
    );

    let ctx = ToolContext::new(&cli.workdir);

    let result = match cli.command {
        Command::List { directory } => ListDirectoryTool.list(&ctx, &directory).await,
        Command::Read { file_path } => {
            ReadFileTool::new(config.tools.max_chars)
                .read(&ctx, &file_path)
                .await
        }
        Command::Write { file_path, content } => WriteFileTool.write(&ctx, &file_path, &content).await,
        Command::Run { file_path, args } => {
            RunScriptTool::new(config.tools.script.clone())
                .run(&ctx, &file_path, &args)
                .await
        }
        Command::Call { name, input } => {
            let input = serde_json::from_str(&input).context("Failed to parse tool input as JSON")?;
            let call = ToolCall {
                id: format!("cli-{}", std::process::id()),
                name,
                input,
            };
            ToolExecutor::from_config(&config.tools).execute(&call, &ctx).await
        }
        Command::Tools => {
            let executor = ToolExecutor::from_config(&config.tools);
            println!("{}", serde_json::to_string_pretty(&executor.definitions())?);
            return Ok(());
        }
    };

    print_result(&result);

    if result.is_error {
        std::process::exit(1);
    }
    Ok(())
}

fn print_result(result: &ToolResult) {
    if result.is_error {
        println!("{}", result.content.red());
    } else {
        println!("{}", result.content);
    }
}
