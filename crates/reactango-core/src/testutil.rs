//! Test doubles for the runner, probe, and prompter seams

use crate::installers::InstallSelection;
use crate::probe::EnvironmentProbe;
use crate::prompt::Prompter;
use crate::shell::{CommandResult, CommandRunner, CommandSpec};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;
use tempfile::TempDir;

/// Records every command it is asked to run; commands whose display line
/// contains one of the failure markers report a non-zero exit
pub struct SpyRunner {
    calls: Mutex<Vec<CommandSpec>>,
    failures: Vec<String>,
    clone_files: Vec<String>,
}

impl SpyRunner {
    pub fn new() -> Self {
        Self::failing_on(&[])
    }

    pub fn failing_on(markers: &[&str]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failures: markers.iter().map(|m| m.to_string()).collect(),
            clone_files: Vec::new(),
        }
    }

    /// A runner whose `git clone` materializes the target directory with the
    /// given relative files, the way a real clone leaves a working tree
    pub fn cloning_with(files: &[&str]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failures: Vec::new(),
            clone_files: files.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    fn materialize_clone(&self, spec: &CommandSpec) {
        if self.clone_files.is_empty()
            || spec.program != "git"
            || spec.args.first().map(String::as_str) != Some("clone")
        {
            return;
        }
        let target = std::path::PathBuf::from(spec.args.last().expect("clone has a target"));
        for file in &self.clone_files {
            let path = target.join(file);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).expect("failed to create clone dirs");
            }
            std::fs::write(&path, b"").expect("failed to write clone file");
        }
    }
}

#[async_trait]
impl CommandRunner for SpyRunner {
    async fn run(&self, spec: &CommandSpec) -> CommandResult {
        self.calls.lock().unwrap().push(spec.clone());
        let line = spec.display();
        let fail = self.failures.iter().any(|marker| line.contains(marker));
        if !fail {
            self.materialize_clone(spec);
        }
        CommandResult {
            exit_code: Some(if fail { 1 } else { 0 }),
            succeeded: !fail,
            stdout: None,
            stderr: fail.then(|| "simulated failure".to_string()),
        }
    }
}

/// Probe that only knows the commands it was given
pub struct FakeProbe {
    available: HashSet<String>,
}

impl FakeProbe {
    pub fn with(commands: &[&str]) -> Self {
        Self {
            available: commands.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl EnvironmentProbe for FakeProbe {
    fn exists(&self, command: &str) -> bool {
        self.available.contains(command)
    }
}

/// Prompter with canned answers
pub struct ScriptedPrompter {
    confirm_answer: bool,
    selection: InstallSelection,
}

impl ScriptedPrompter {
    pub fn answering(confirm_answer: bool, selection: InstallSelection) -> Self {
        Self {
            confirm_answer,
            selection,
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, _question: &str, _default: bool) -> Result<bool> {
        Ok(self.confirm_answer)
    }

    fn select_install(&self, _options: &[InstallSelection]) -> Result<InstallSelection> {
        Ok(self.selection)
    }
}

/// Prompter whose terminal is gone; every question errors
pub struct FailingPrompter;

impl Prompter for FailingPrompter {
    fn confirm(&self, _question: &str, _default: bool) -> Result<bool> {
        anyhow::bail!("no interactive terminal")
    }

    fn select_install(&self, _options: &[InstallSelection]) -> Result<InstallSelection> {
        anyhow::bail!("no interactive terminal")
    }
}

/// Temp directory pre-populated with the given manifest files
pub fn project_dir_with(manifests: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    for name in manifests {
        std::fs::write(dir.path().join(name), b"").expect("failed to write manifest");
    }
    dir
}
