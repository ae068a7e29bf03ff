//! Python backend dependency installation

use crate::log;
use crate::probe::EnvironmentProbe;
use crate::shell::{CommandRunner, CommandSpec};
use colored::Colorize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Manifest file that signals Python dependencies
pub const REQUIREMENTS_FILE: &str = "requirements.txt";

/// Name of the virtual environment directory created inside the project
const VENV_DIR: &str = "venv";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Python is not installed or not in PATH. Please install Python 3.")]
    MissingInterpreter,

    #[error("pip is not installed or not in PATH. Please install pip.")]
    MissingPackageManager,

    #[error("failed to create virtual environment (exit code: {code:?})")]
    EnvCreationFailed { code: Option<i32> },

    #[error("failed to install Python dependencies (exit code: {code:?})")]
    InstallFailed {
        code: Option<i32>,
        stderr: Option<String>,
    },
}

/// Installs Python dependencies from `requirements.txt`, optionally inside a
/// project-local virtual environment
pub struct BackendInstaller<'a> {
    runner: &'a dyn CommandRunner,
    probe: &'a dyn EnvironmentProbe,
}

impl<'a> BackendInstaller<'a> {
    pub fn new(runner: &'a dyn CommandRunner, probe: &'a dyn EnvironmentProbe) -> Self {
        Self { runner, probe }
    }

    pub async fn install(&self, project_dir: &Path, use_venv: bool) -> Result<(), BackendError> {
        let python = if self.probe.exists("python3") {
            "python3"
        } else if self.probe.exists("python") {
            "python"
        } else {
            return Err(BackendError::MissingInterpreter);
        };

        let pip = if self.probe.exists("pip3") {
            "pip3"
        } else if self.probe.exists("pip") {
            "pip"
        } else {
            return Err(BackendError::MissingPackageManager);
        };

        // Absence of a manifest is not an error
        if !project_dir.join(REQUIREMENTS_FILE).exists() {
            log::warning(format!(
                "'{}' not found in {}. Skipping backend dependencies.",
                REQUIREMENTS_FILE,
                project_dir.display()
            ));
            return Ok(());
        }

        let pip_to_use = if use_venv {
            self.create_venv(project_dir, python, pip).await?
        } else {
            log::info("Not using a virtual environment for Python dependencies.");
            PathBuf::from(pip)
        };

        log::step(format!(
            "Installing Python packages from '{}' using '{}'...",
            REQUIREMENTS_FILE.yellow(),
            pip_to_use.display().to_string().cyan()
        ));

        let spec = CommandSpec::new(pip_to_use.to_string_lossy())
            .args(["install", "-r", REQUIREMENTS_FILE])
            .cwd(project_dir)
            .streamed();
        let result = self.runner.run(&spec).await;
        if !result.succeeded {
            result.report_failure(&spec, "Failed to install Python dependencies.");
            return Err(BackendError::InstallFailed {
                code: result.exit_code,
                stderr: result.stderr,
            });
        }

        log::success("Backend dependencies installed successfully!");
        Ok(())
    }

    /// Create the venv and resolve the pip executable inside it
    async fn create_venv(
        &self,
        project_dir: &Path,
        python: &str,
        pip: &str,
    ) -> Result<PathBuf, BackendError> {
        let venv_path = project_dir.join(VENV_DIR);
        log::step(format!(
            "Creating Python virtual environment at '{}'...",
            venv_path.display().to_string().yellow()
        ));

        let spec = CommandSpec::new(python)
            .args(["-m", "venv", VENV_DIR])
            .cwd(project_dir)
            .streamed();
        let result = self.runner.run(&spec).await;
        if !result.succeeded {
            result.report_failure(&spec, "Failed to create virtual environment.");
            return Err(BackendError::EnvCreationFailed {
                code: result.exit_code,
            });
        }

        let (subdir, pip_binary) = if cfg!(target_os = "windows") {
            ("Scripts", format!("{pip}.exe"))
        } else {
            ("bin", pip.to_string())
        };
        let activate = if cfg!(target_os = "windows") {
            ".\\venv\\Scripts\\activate"
        } else {
            "source venv/bin/activate"
        };
        log::info(format!(
            "Virtual environment created. To activate it later: {}",
            activate.cyan()
        ));

        Ok(venv_path.join(subdir).join(pip_binary))
    }
}
