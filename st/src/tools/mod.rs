//! Tool system for agent file and script operations
//!
//! Tools provide directory listing, file read/write, and script execution
//! to an agent loop. Every call gets a `ToolContext` scoped to a working
//! directory - tools cannot escape it, and every outcome (including
//! failures) comes back as a `ToolResult` string.

mod context;
mod error;
mod executor;
mod traits;

pub mod builtin;

pub use context::ToolContext;
pub use error::ToolError;
pub use executor::{ToolCall, ToolDefinition, ToolExecutor};
pub use traits::{Tool, ToolResult};
