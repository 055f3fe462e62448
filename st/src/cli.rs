//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sandbox-tools - run agent tools against a working directory
#[derive(Parser)]
#[command(
    name = "st",
    about = "Run sandboxed agent tools against a working directory",
    version,
    after_help = "Logs are written to: ~/.local/share/sandbox-tools/logs/sandbox-tools.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Working directory every tool is confined to
    #[arg(short, long, global = true, default_value = ".", help = "Working directory tools are confined to")]
    pub workdir: PathBuf,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// List a directory with sizes
    List {
        /// Directory relative to the working directory
        #[arg(default_value = ".")]
        directory: String,
    },

    /// Read a file (truncated at the configured character budget)
    Read {
        /// File relative to the working directory
        file_path: String,
    },

    /// Write content to a file, creating parent directories
    Write {
        /// File relative to the working directory
        file_path: String,

        /// Content to write
        content: String,
    },

    /// Run a script with optional arguments
    Run {
        /// Script relative to the working directory
        file_path: String,

        /// Arguments passed to the script
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Invoke a tool by name with JSON input, as an agent would
    Call {
        /// Tool name (see `st tools`)
        name: String,

        /// JSON object with the tool's arguments
        #[arg(default_value = "{}")]
        input: String,
    },

    /// Print tool definitions as JSON
    Tools,
}

/// Location of the log file
pub fn get_log_path() -> PathBuf {
    get_log_dir().join("sandbox-tools.log")
}

/// Directory holding the log file
pub fn get_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sandbox-tools")
        .join("logs")
}
