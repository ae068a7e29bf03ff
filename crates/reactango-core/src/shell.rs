//! Shell command execution
//!
//! All external commands go through the `CommandRunner` trait so that tests
//! can observe and script the shell boundary. The production implementation
//! runs awaited tokio subprocesses; callers see completion before proceeding
//! regardless of output mode.

use async_trait::async_trait;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// How a command's output is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Inherit the terminal streams for real-time output
    Streamed,
    /// Capture stdout/stderr for diagnostics
    Captured,
}

/// A single command invocation with an explicit working directory
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub mode: OutputMode,
}

impl CommandSpec {
    /// Create a captured-output command with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            mode: OutputMode::Captured,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Switch to streamed mode (inherited terminal I/O)
    pub fn streamed(mut self) -> Self {
        self.mode = OutputMode::Streamed;
        self
    }

    /// Human-readable command line for log messages
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Result of one command invocation
///
/// A non-zero exit is reported here, never raised as an error; `exit_code` is
/// `None` when the process could not be spawned at all.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: Option<i32>,
    pub succeeded: bool,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl CommandResult {
    fn spawn_failure(err: std::io::Error) -> Self {
        Self {
            exit_code: None,
            succeeded: false,
            stdout: None,
            stderr: Some(err.to_string()),
        }
    }

    /// Print the failure with enough context to retry the command manually
    pub fn report_failure(&self, spec: &CommandSpec, what_failed: &str) {
        let code = self
            .exit_code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "none".to_string());
        crate::log::error(format!("{} (exit code: {})", what_failed, code));
        eprintln!("  {} {}", "command:".dimmed(), spec.display().cyan());
        if let Some(dir) = &spec.cwd {
            eprintln!("  {} {}", "cwd:".dimmed(), dir.display().to_string().yellow());
        }
        if let Some(stderr) = &self.stderr {
            if !stderr.trim().is_empty() {
                eprintln!("{}", stderr.trim_end().red());
            }
        }
        if let Some(stdout) = &self.stdout {
            if !stdout.trim().is_empty() {
                eprintln!("{}", stdout.trim_end().dimmed());
            }
        }
    }
}

/// Execution seam for everything that shells out
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, spec: &CommandSpec) -> CommandResult;
}

/// Runner backed by real subprocesses
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, spec: &CommandSpec) -> CommandResult {
        log_invocation(spec);

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        if let Some(dir) = &spec.cwd {
            cmd.current_dir(dir);
        }

        match spec.mode {
            OutputMode::Streamed => {
                cmd.stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit());
                match cmd.status().await {
                    Ok(status) => CommandResult {
                        exit_code: status.code(),
                        succeeded: status.success(),
                        stdout: None,
                        stderr: None,
                    },
                    Err(e) => CommandResult::spawn_failure(e),
                }
            }
            OutputMode::Captured => match cmd.output().await {
                Ok(out) => CommandResult {
                    exit_code: out.status.code(),
                    succeeded: out.status.success(),
                    stdout: Some(String::from_utf8_lossy(&out.stdout).into_owned()),
                    stderr: Some(String::from_utf8_lossy(&out.stderr).into_owned()),
                },
                Err(e) => CommandResult::spawn_failure(e),
            },
        }
    }
}

fn log_invocation(spec: &CommandSpec) {
    let in_dir = spec
        .cwd
        .as_deref()
        .filter(|dir| *dir != Path::new("."))
        .map(|dir| format!(" in {}", dir.display().to_string().yellow()))
        .unwrap_or_default();
    crate::log::step(format!("Executing: {}{}", spec.display().cyan(), in_dir));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captured_command_collects_stdout() {
        let spec = CommandSpec::new("sh").args(["-c", "echo hello"]);
        let result = SystemRunner.run(&spec).await;

        assert!(result.succeeded);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.unwrap().contains("hello"));
    }

    #[tokio::test]
    async fn nonzero_exit_is_a_result_not_an_error() {
        let spec = CommandSpec::new("sh").args(["-c", "exit 3"]);
        let result = SystemRunner.run(&spec).await;

        assert!(!result.succeeded);
        assert_eq!(result.exit_code, Some(3));
    }

    #[tokio::test]
    async fn spawn_failure_has_no_exit_code() {
        let spec = CommandSpec::new("definitely-not-a-real-binary-xyz");
        let result = SystemRunner.run(&spec).await;

        assert!(!result.succeeded);
        assert_eq!(result.exit_code, None);
        assert!(result.stderr.is_some());
    }

    #[test]
    fn display_joins_program_and_args() {
        let spec = CommandSpec::new("git")
            .arg("clone")
            .arg("https://example.com/repo.git");
        assert_eq!(spec.display(), "git clone https://example.com/repo.git");
    }
}
