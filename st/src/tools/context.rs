//! ToolContext - execution context for tools

use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

use super::ToolError;

/// Execution context for tools - scoped to a single working directory
///
/// Every tool call resolves its paths through `validate_path`, so no
/// operation ever touches a path outside `root`. The root is read-only for
/// the lifetime of a call; the context holds no other state and is safe to
/// share across concurrent calls.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Working directory - all file ops constrained here
    pub root: PathBuf,
}

impl ToolContext {
    /// Create a new tool context
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        debug!(?root, "ToolContext::new: called");
        Self { root }
    }

    /// Canonical absolute form of the working directory
    pub fn canonical_root(&self) -> Result<PathBuf, ToolError> {
        self.root.canonicalize().map_err(|source| ToolError::InvalidRoot {
            root: self.root.clone(),
            source,
        })
    }

    /// Validate path is within the working directory (sandbox enforcement)
    ///
    /// `verb` names the attempted operation and only shapes the rejection
    /// message. The returned path is absolute and contained in the canonical
    /// root; it may not exist yet.
    pub fn validate_path(&self, path: &str, verb: &'static str) -> Result<PathBuf, ToolError> {
        debug!(%path, verb, "ToolContext::validate_path: called");
        let root = self.canonical_root()?;
        let joined = root.join(path);

        let resolved = match resolve(&joined) {
            Some(p) => p,
            None => {
                warn!(%path, "ToolContext::validate_path: unresolvable symlink");
                return Err(ToolError::OutsideWorkdir {
                    verb,
                    path: path.to_string(),
                });
            }
        };

        // Component-wise prefix: /work never contains /workshop
        if resolved.starts_with(&root) {
            debug!(?resolved, "ToolContext::validate_path: path is within root");
            Ok(resolved)
        } else {
            warn!(%path, ?resolved, "ToolContext::validate_path: sandbox violation detected");
            Err(ToolError::OutsideWorkdir {
                verb,
                path: path.to_string(),
            })
        }
    }
}

/// Resolve `path` one component at a time, following symlinks as they appear
///
/// The prefix built so far never contains a symlink, so `..` is always a
/// plain pop, including a `..` that climbs out of a directory that does not
/// exist yet and back onto an existing link. Returns `None` when a symlink
/// cannot be resolved (dangling or looping), since its target cannot be
/// proven to stay inside the root.
fn resolve(path: &Path) -> Option<PathBuf> {
    let mut resolved = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(_) | Component::RootDir | Component::Prefix(_) => {
                resolved.push(component.as_os_str());
                let is_symlink = resolved
                    .symlink_metadata()
                    .map(|m| m.file_type().is_symlink())
                    .unwrap_or(false);
                if is_symlink {
                    match resolved.canonicalize() {
                        Ok(target) => resolved = target,
                        Err(e) => {
                            debug!(?resolved, %e, "resolve: unresolvable symlink");
                            return None;
                        }
                    }
                }
            }
        }
    }
    Some(resolved)
}
