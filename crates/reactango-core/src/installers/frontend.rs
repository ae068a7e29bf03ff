//! Node frontend dependency installation

use crate::log;
use crate::probe::EnvironmentProbe;
use crate::shell::{CommandRunner, CommandSpec};
use std::path::Path;
use thiserror::Error;

/// Manifest file that signals Node dependencies
pub const PACKAGE_MANIFEST: &str = "package.json";

#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("Node.js ('node') is not installed or not in PATH. Please install Node.js.")]
    MissingRuntime,

    #[error("failed to bootstrap pnpm: {reason}")]
    BootstrapFailed { reason: String },

    #[error("failed to install Node.js dependencies (exit code: {code:?})")]
    InstallFailed {
        code: Option<i32>,
        stderr: Option<String>,
    },
}

/// Installs Node dependencies with pnpm, bootstrapping pnpm via npm when it
/// is not yet on PATH
pub struct FrontendInstaller<'a> {
    runner: &'a dyn CommandRunner,
    probe: &'a dyn EnvironmentProbe,
}

impl<'a> FrontendInstaller<'a> {
    pub fn new(runner: &'a dyn CommandRunner, probe: &'a dyn EnvironmentProbe) -> Self {
        Self { runner, probe }
    }

    pub async fn install(&self, project_dir: &Path) -> Result<(), FrontendError> {
        if !self.probe.exists("node") {
            return Err(FrontendError::MissingRuntime);
        }

        // Absence of a manifest is not an error
        if !project_dir.join(PACKAGE_MANIFEST).exists() {
            log::warning(format!(
                "'{}' not found in {}. Skipping frontend dependencies.",
                PACKAGE_MANIFEST,
                project_dir.display()
            ));
            return Ok(());
        }

        if !self.probe.exists("pnpm") {
            self.bootstrap_pnpm().await?;
        }

        log::step("Installing Node.js packages with pnpm...");
        let spec = CommandSpec::new("pnpm").arg("install").cwd(project_dir).streamed();
        let result = self.runner.run(&spec).await;
        if !result.succeeded {
            result.report_failure(&spec, "Failed to install Node.js dependencies.");
            return Err(FrontendError::InstallFailed {
                code: result.exit_code,
                stderr: result.stderr,
            });
        }

        log::success("Frontend dependencies installed successfully!");
        Ok(())
    }

    async fn bootstrap_pnpm(&self) -> Result<(), FrontendError> {
        log::info("pnpm not found. Attempting to install pnpm globally using npm...");

        if !self.probe.exists("npm") {
            return Err(FrontendError::BootstrapFailed {
                reason: "npm is not installed or not in PATH. Please install pnpm or npm manually."
                    .to_string(),
            });
        }

        let spec = CommandSpec::new("npm").args(["install", "-g", "pnpm"]).streamed();
        let result = self.runner.run(&spec).await;
        if !result.succeeded {
            result.report_failure(&spec, "Failed to install pnpm globally.");
            return Err(FrontendError::BootstrapFailed {
                reason: format!(
                    "'npm install -g pnpm' exited with code {:?}",
                    result.exit_code
                ),
            });
        }

        log::success(
            "pnpm installed globally. You might need to open a new terminal for 'pnpm' to be available.",
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{project_dir_with, FakeProbe, SpyRunner};

    #[tokio::test]
    async fn fails_without_node() {
        let dir = project_dir_with(&[PACKAGE_MANIFEST]);
        let runner = SpyRunner::new();
        let probe = FakeProbe::with(&["pnpm", "npm"]);

        let err = FrontendInstaller::new(&runner, &probe)
            .install(dir.path())
            .await
            .unwrap_err();

        assert!(matches!(err, FrontendError::MissingRuntime));
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_manifest_is_a_noop_success() {
        let dir = project_dir_with(&[]);
        let runner = SpyRunner::new();
        let probe = FakeProbe::with(&["node", "pnpm"]);

        FrontendInstaller::new(&runner, &probe)
            .install(dir.path())
            .await
            .unwrap();

        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn installs_directly_when_pnpm_is_present() {
        let dir = project_dir_with(&[PACKAGE_MANIFEST]);
        let runner = SpyRunner::new();
        let probe = FakeProbe::with(&["node", "pnpm"]);

        FrontendInstaller::new(&runner, &probe)
            .install(dir.path())
            .await
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "pnpm");
        assert_eq!(calls[0].args, vec!["install"]);
        assert_eq!(calls[0].cwd.as_deref(), Some(dir.path()));
    }

    #[tokio::test]
    async fn bootstraps_pnpm_through_npm_when_absent() {
        let dir = project_dir_with(&[PACKAGE_MANIFEST]);
        let runner = SpyRunner::new();
        let probe = FakeProbe::with(&["node", "npm"]);

        FrontendInstaller::new(&runner, &probe)
            .install(dir.path())
            .await
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].program, "npm");
        assert_eq!(calls[0].args, vec!["install", "-g", "pnpm"]);
        assert_eq!(calls[1].program, "pnpm");
    }

    #[tokio::test]
    async fn bootstrap_fails_when_npm_is_also_missing() {
        let dir = project_dir_with(&[PACKAGE_MANIFEST]);
        let runner = SpyRunner::new();
        let probe = FakeProbe::with(&["node"]);

        let err = FrontendInstaller::new(&runner, &probe)
            .install(dir.path())
            .await
            .unwrap_err();

        assert!(matches!(err, FrontendError::BootstrapFailed { .. }));
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn install_failure_carries_the_exit_code() {
        let dir = project_dir_with(&[PACKAGE_MANIFEST]);
        let runner = SpyRunner::failing_on(&["pnpm"]);
        let probe = FakeProbe::with(&["node", "pnpm"]);

        let err = FrontendInstaller::new(&runner, &probe)
            .install(dir.path())
            .await
            .unwrap_err();

        match err {
            FrontendError::InstallFailed { code, .. } => assert_eq!(code, Some(1)),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
