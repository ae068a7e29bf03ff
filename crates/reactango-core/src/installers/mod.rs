//! Dependency installation planning and orchestration
//!
//! The planner intersects the manifests present in a freshly cloned project
//! with the user's selection, then runs the matching installers in a fixed
//! order (backend before frontend). Installer failures are isolated: one
//! ecosystem failing never prevents the other from being attempted.

pub mod backend;
pub mod frontend;

use crate::log;
use crate::probe::EnvironmentProbe;
use crate::shell::CommandRunner;
use std::path::Path;

pub use backend::{BackendError, BackendInstaller, REQUIREMENTS_FILE};
pub use frontend::{FrontendError, FrontendInstaller, PACKAGE_MANIFEST};

/// A dependency ecosystem that can be installed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstallChoice {
    Backend,
    Frontend,
}

impl InstallChoice {
    pub fn display_name(&self) -> &'static str {
        match self {
            InstallChoice::Backend => "Backend",
            InstallChoice::Frontend => "Frontend",
        }
    }
}

/// Which dependency manifests exist in the project directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestSet {
    pub backend: bool,
    pub frontend: bool,
}

impl ManifestSet {
    /// Inspect the project directory for known manifest files
    pub fn detect(project_dir: &Path) -> Self {
        Self {
            backend: project_dir.join(REQUIREMENTS_FILE).exists(),
            frontend: project_dir.join(PACKAGE_MANIFEST).exists(),
        }
    }

    pub fn any(&self) -> bool {
        self.backend || self.frontend
    }

    pub fn both(&self) -> bool {
        self.backend && self.frontend
    }
}

/// User-facing install selection, offered according to manifests present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallSelection {
    All,
    Backend,
    Frontend,
    None,
}

impl InstallSelection {
    pub fn display_name(&self) -> &'static str {
        match self {
            InstallSelection::All => "Install All Dependencies (Backend + Frontend)",
            InstallSelection::Backend => "Backend Only (Python with venv)",
            InstallSelection::Frontend => "Frontend Only (Node.js with pnpm)",
            InstallSelection::None => "Install None (Skip all installations)",
        }
    }

    /// Selections offered for the given manifests; "All" only when both
    /// manifests exist, "None" always
    pub fn available(manifests: &ManifestSet) -> Vec<InstallSelection> {
        let mut options = Vec::new();
        if manifests.both() {
            options.push(InstallSelection::All);
        }
        if manifests.backend {
            options.push(InstallSelection::Backend);
        }
        if manifests.frontend {
            options.push(InstallSelection::Frontend);
        }
        options.push(InstallSelection::None);
        options
    }
}

/// Resolved decision on which installers to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallPlan {
    pub backend: bool,
    pub frontend: bool,
    pub use_venv: bool,
}

/// Intersect manifests present with the user's selection
///
/// An ecosystem is only ever planned when its manifest exists, regardless of
/// what was selected.
pub fn resolve_plan(manifests: &ManifestSet, selection: InstallSelection, use_venv: bool) -> InstallPlan {
    InstallPlan {
        backend: manifests.backend
            && matches!(selection, InstallSelection::All | InstallSelection::Backend),
        frontend: manifests.frontend
            && matches!(selection, InstallSelection::All | InstallSelection::Frontend),
        use_venv,
    }
}

/// Aggregated result of the install phase
#[derive(Debug, Clone, Default)]
pub struct InstallOutcome {
    pub attempted: Vec<InstallChoice>,
    pub succeeded: Vec<InstallChoice>,
}

impl InstallOutcome {
    /// True when every attempted installer succeeded (vacuously true when
    /// nothing was attempted)
    pub fn overall_success(&self) -> bool {
        self.attempted.len() == self.succeeded.len()
    }

    pub fn attempted(&self, choice: InstallChoice) -> bool {
        self.attempted.contains(&choice)
    }

    pub fn installed(&self, choice: InstallChoice) -> bool {
        self.succeeded.contains(&choice)
    }
}

/// Run the planned installers, backend before frontend, isolating failures
pub async fn run_project_setup(
    runner: &dyn CommandRunner,
    probe: &dyn EnvironmentProbe,
    project_dir: &Path,
    plan: &InstallPlan,
) -> InstallOutcome {
    let mut outcome = InstallOutcome::default();

    if plan.backend {
        outcome.attempted.push(InstallChoice::Backend);
        log::info(format!(
            "[{}] Starting backend dependency installation...",
            outcome.attempted.len()
        ));
        match BackendInstaller::new(runner, probe)
            .install(project_dir, plan.use_venv)
            .await
        {
            Ok(()) => {
                outcome.succeeded.push(InstallChoice::Backend);
                log::success("Backend installation completed successfully!");
            }
            Err(e) => log::error(format!("Backend dependency installation failed: {e}")),
        }
    }

    if plan.frontend {
        outcome.attempted.push(InstallChoice::Frontend);
        log::info(format!(
            "[{}] Starting frontend dependency installation...",
            outcome.attempted.len()
        ));
        match FrontendInstaller::new(runner, probe).install(project_dir).await {
            Ok(()) => {
                outcome.succeeded.push(InstallChoice::Frontend);
                log::success("Frontend installation completed successfully!");
            }
            Err(e) => log::error(format!("Frontend dependency installation failed: {e}")),
        }
    }

    if !outcome.attempted.is_empty() {
        if outcome.overall_success() {
            log::success("All dependency installations completed successfully!");
        } else {
            log::warning(
                "Dependency installation completed with some issues. Please review the logs above.",
            );
        }
    }

    outcome
}
