//! sandbox-tools configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default character budget for file reads
pub const DEFAULT_MAX_CHARS: usize = 10_000;

/// Default wall-clock limit for script execution
pub const DEFAULT_SCRIPT_TIMEOUT_MS: u64 = 30_000;

/// Default extension a file must carry to be executed
pub const DEFAULT_SCRIPT_EXTENSION: &str = "py";

/// Interpreter names tried on PATH, in order
const INTERPRETER_CANDIDATES: &[&str] = &["python3", "python"];

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tool limits
    pub tools: ToolsConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, it must load
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .sandbox-tools.yml
        let local_config = PathBuf::from(".sandbox-tools.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/sandbox-tools/sandbox-tools.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("sandbox-tools").join("sandbox-tools.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Limits threaded into the builtin tools
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Maximum characters returned by a file read
    #[serde(rename = "max-chars")]
    pub max_chars: usize,

    /// Script execution settings
    pub script: ScriptConfig,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            script: ScriptConfig::default(),
        }
    }
}

/// Script execution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Required file extension, without the dot
    pub extension: String,

    /// Wall-clock timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Interpreter to launch scripts with (resolved from the environment when unset)
    pub interpreter: Option<PathBuf>,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_SCRIPT_EXTENSION.to_string(),
            timeout_ms: DEFAULT_SCRIPT_TIMEOUT_MS,
            interpreter: None,
        }
    }
}

impl ScriptConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// The interpreter scripts run under
    ///
    /// An explicit setting wins. Otherwise an active virtualenv's python,
    /// then the first candidate found on PATH.
    pub fn resolve_interpreter(&self) -> PathBuf {
        match &self.interpreter {
            Some(interpreter) => interpreter.clone(),
            None => find_interpreter(std::env::var_os("VIRTUAL_ENV"), std::env::var_os("PATH")),
        }
    }
}

fn find_interpreter(virtual_env: Option<OsString>, path: Option<OsString>) -> PathBuf {
    if let Some(venv) = virtual_env {
        let bin = if cfg!(windows) { "Scripts" } else { "bin" };
        let candidate = PathBuf::from(venv)
            .join(bin)
            .join(format!("python{}", std::env::consts::EXE_SUFFIX));
        if candidate.is_file() {
            return candidate;
        }
    }

    if let Some(path) = path {
        for name in INTERPRETER_CANDIDATES {
            let file_name = format!("{}{}", name, std::env::consts::EXE_SUFFIX);
            if let Some(found) = std::env::split_paths(&path)
                .map(|dir| dir.join(&file_name))
                .find(|candidate| candidate.is_file())
            {
                return found;
            }
        }
    }

    PathBuf::from(INTERPRETER_CANDIDATES[0])
}
