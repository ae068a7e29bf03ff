//! Executable lookup on PATH

use std::process::{Command, Stdio};

/// PATH lookup seam, so installers can be tested without real binaries
pub trait EnvironmentProbe: Send + Sync {
    /// Check whether a command is resolvable on the current PATH
    fn exists(&self, command: &str) -> bool;
}

/// Probe backed by the platform's lookup tools
///
/// Tries `which` first and falls back to `where` for Windows shells. Any
/// failure of the lookup mechanism itself counts as "not found".
pub struct SystemProbe;

impl EnvironmentProbe for SystemProbe {
    fn exists(&self, command: &str) -> bool {
        lookup("which", command) || lookup("where", command)
    }
}

fn lookup(tool: &str, command: &str) -> bool {
    Command::new(tool)
        .arg(command)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
