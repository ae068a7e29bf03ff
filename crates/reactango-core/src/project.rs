//! Project creation requests

use crate::bootstrap::BootstrapError;
use std::path::{Path, PathBuf};

/// A validated request to create a new project
///
/// Immutable once constructed: the name is non-empty, contains no path
/// separators, and does not collide with an existing directory.
#[derive(Debug, Clone)]
pub struct ProjectRequest {
    name: String,
    resolved_path: PathBuf,
    source_branch: Option<String>,
}

impl ProjectRequest {
    /// Validate a project name against the current working directory
    pub fn new(name: &str, source_branch: Option<String>) -> Result<Self, BootstrapError> {
        let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::resolve_in(&base, name, source_branch)
    }

    /// Validate a project name against an explicit base directory
    pub fn resolve_in(
        base: &Path,
        name: &str,
        source_branch: Option<String>,
    ) -> Result<Self, BootstrapError> {
        if name.trim().is_empty() {
            return Err(BootstrapError::InvalidName(name.to_string()));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(BootstrapError::InvalidName(name.to_string()));
        }

        let resolved_path = base.join(name);
        if resolved_path.exists() {
            return Err(BootstrapError::TargetExists(resolved_path));
        }

        Ok(Self {
            name: name.to_string(),
            resolved_path,
            source_branch,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.resolved_path
    }

    pub fn source_branch(&self) -> Option<&str> {
        self.source_branch.as_deref()
    }
}
