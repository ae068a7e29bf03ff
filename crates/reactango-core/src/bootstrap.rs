//! Top-level project bootstrap driver
//!
//! Drives one run end to end: clone the template, strip its git history,
//! optionally initialize a fresh repository, run the planned installers, and
//! print next-step guidance. Only the target collision and the clone itself
//! are fatal; everything after the clone degrades with warnings.

use crate::installers::{
    self, InstallChoice, InstallOutcome, InstallSelection, ManifestSet, REQUIREMENTS_FILE,
};
use crate::log;
use crate::probe::EnvironmentProbe;
use crate::project::ProjectRequest;
use crate::prompt::Prompter;
use crate::shell::{CommandRunner, CommandSpec};
use colored::Colorize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Template repository every new project starts from
pub const TEMPLATE_REPO_URL: &str = "https://github.com/Abdullah6346/ReactTangoTemplate.git";

/// Environment variable for overriding the template repository
pub const TEMPLATE_URL_ENV: &str = "REACTANGO_TEMPLATE_URL";

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("'{0}' is not a valid project name. Use a non-empty name without path separators.")]
    InvalidName(String),

    #[error("Directory '{0}' already exists. Please choose a different name or remove the existing directory.")]
    TargetExists(PathBuf),

    #[error("failed to clone template repository (exit code: {code:?})")]
    CloneFailed {
        code: Option<i32>,
        stderr: Option<String>,
    },
}

/// Flag-driven choices for one bootstrap run
#[derive(Debug, Clone, Default)]
pub struct BootstrapOptions {
    /// Forced git-init decision; `None` asks interactively
    pub init_git: Option<bool>,
    /// Install every ecosystem with a manifest, without prompting
    pub install_all: bool,
    /// Skip detection, prompting, and every installer
    pub skip_all_install: bool,
    /// Install Python dependencies into the ambient interpreter
    pub no_venv: bool,
}

/// Drives the clone/init/install sequence for a single project
pub struct ProjectBootstrapper<'a> {
    runner: &'a dyn CommandRunner,
    probe: &'a dyn EnvironmentProbe,
    prompter: &'a dyn Prompter,
}

impl<'a> ProjectBootstrapper<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        probe: &'a dyn EnvironmentProbe,
        prompter: &'a dyn Prompter,
    ) -> Self {
        Self {
            runner,
            probe,
            prompter,
        }
    }

    /// Run the full bootstrap sequence
    pub async fn run(
        &self,
        request: &ProjectRequest,
        options: &BootstrapOptions,
    ) -> Result<InstallOutcome, BootstrapError> {
        // The request was validated at construction, but the directory may
        // have appeared since
        if request.path().exists() {
            return Err(BootstrapError::TargetExists(request.path().to_path_buf()));
        }

        self.clone_template(request).await?;
        self.strip_template_history(request.path()).await;
        self.initialize_git(request, options).await;
        let outcome = self.install_phase(request.path(), options).await;
        print_completion(request, options, &outcome);
        Ok(outcome)
    }

    async fn clone_template(&self, request: &ProjectRequest) -> Result<(), BootstrapError> {
        let template_url =
            std::env::var(TEMPLATE_URL_ENV).unwrap_or_else(|_| TEMPLATE_REPO_URL.to_string());

        log::step(format!(
            "Cloning template into '{}'...",
            request.name().yellow()
        ));

        let mut spec = CommandSpec::new("git").arg("clone");
        if let Some(branch) = request.source_branch() {
            spec = spec.args(["--branch", branch]);
        }
        spec = spec
            .arg(&template_url)
            .arg(request.path().display().to_string());

        let result = self.runner.run(&spec).await;
        if !result.succeeded {
            result.report_failure(&spec, "Failed to clone template repository.");
            return Err(BootstrapError::CloneFailed {
                code: result.exit_code,
                stderr: result.stderr,
            });
        }

        log::success(format!(
            "Template cloned successfully into '{}'.",
            request.path().display().to_string().yellow()
        ));
        Ok(())
    }

    /// Best-effort removal of the template's own git history
    async fn strip_template_history(&self, project_dir: &Path) {
        let git_dir = project_dir.join(".git");
        if !git_dir.exists() {
            return;
        }

        log::step("Removing template's .git directory...");
        match tokio::fs::remove_dir_all(&git_dir).await {
            Ok(()) => log::success("Template .git directory removed."),
            Err(e) => log::warning(format!(
                "Could not remove .git directory: {e}. Please remove it manually."
            )),
        }
    }

    /// Decide whether to initialize a fresh repository, honoring force flags
    fn decide_git_init(&self, options: &BootstrapOptions) -> bool {
        if !self.probe.exists("git") {
            if options.init_git == Some(true) {
                log::warning(
                    "--init-git flag used, but Git command not found. Cannot initialize repository.",
                );
            } else {
                log::warning("Git command not found. Skipping git repository initialization.");
            }
            return false;
        }

        match options.init_git {
            Some(true) => {
                log::step("--init-git flag used: Forcing git initialization.");
                true
            }
            Some(false) => {
                log::info("--no-init-git flag used: Skipping git initialization.");
                false
            }
            None => match self
                .prompter
                .confirm("Initialize a new git repository in the project?", true)
            {
                Ok(answer) => answer,
                Err(e) => {
                    log::warning(format!(
                        "Could not display interactive git prompt ({e}). Defaulting to no git initialization."
                    ));
                    false
                }
            },
        }
    }

    /// Init, stage, and commit; each step gates the next but a failure never
    /// aborts the bootstrap
    async fn initialize_git(&self, request: &ProjectRequest, options: &BootstrapOptions) {
        if !self.decide_git_init(options) {
            return;
        }

        let cwd = request.path();
        log::step(format!(
            "Initializing a new git repository in '{}'...",
            cwd.display().to_string().yellow()
        ));

        if !self.git_step(cwd, &["init"], "Failed to initialize git repository.").await {
            return;
        }
        log::success("New git repository initialized.");

        log::step("Adding files to the new repository...");
        if !self.git_step(cwd, &["add", "."], "Failed to add files to git.").await {
            return;
        }

        log::step("Making initial commit...");
        let message = format!(
            "Initial commit: Bootstrap '{}' from ReactTangoTemplate",
            request.name()
        );
        if self
            .git_step(cwd, &["commit", "-m", &message], "Failed to make initial commit.")
            .await
        {
            log::success(format!("Initial commit made: \"{message}\""));
        }
    }

    async fn git_step(&self, cwd: &Path, args: &[&str], error_message: &str) -> bool {
        let spec = CommandSpec::new("git")
            .args(args.iter().copied())
            .cwd(cwd)
            .streamed();
        let result = self.runner.run(&spec).await;
        if !result.succeeded {
            result.report_failure(&spec, error_message);
        }
        result.succeeded
    }

    /// Resolve the user's install selection from flags or the prompt
    fn decide_selection(
        &self,
        manifests: &ManifestSet,
        options: &BootstrapOptions,
    ) -> InstallSelection {
        if options.install_all {
            log::step("--install-all flag used: Proceeding with all available installations.");
            return InstallSelection::All;
        }

        let available = InstallSelection::available(manifests);
        match self.prompter.select_install(&available) {
            Ok(selection) => {
                log::info(format!("Selected: {}", selection.display_name()));
                selection
            }
            Err(e) => {
                log::warning(format!(
                    "Could not display interactive install prompt ({e}). Skipping installations."
                ));
                InstallSelection::None
            }
        }
    }

    async fn install_phase(
        &self,
        project_dir: &Path,
        options: &BootstrapOptions,
    ) -> InstallOutcome {
        if options.skip_all_install {
            log::info("--skip-all-install flag used. All dependency installations are skipped.");
            return InstallOutcome::default();
        }

        let manifests = ManifestSet::detect(project_dir);
        if !manifests.any() {
            log::info(
                "No dependency manifest files (requirements.txt, package.json) found. Skipping installation phase.",
            );
            return InstallOutcome::default();
        }

        let selection = self.decide_selection(&manifests, options);
        let plan = installers::resolve_plan(&manifests, selection, !options.no_venv);
        if !plan.backend && !plan.frontend {
            log::info("No dependencies selected for installation.");
            return InstallOutcome::default();
        }

        installers::run_project_setup(self.runner, self.probe, project_dir, &plan).await
    }
}

/// Print the completion banner and next-step guidance tailored to what was
/// (and wasn't) installed
fn print_completion(request: &ProjectRequest, options: &BootstrapOptions, outcome: &InstallOutcome) {
    println!();
    log::success(format!(
        "Project '{}' created successfully!",
        request.name().yellow().bold()
    ));

    let installed_backend = outcome.installed(InstallChoice::Backend);
    let installed_frontend = outcome.installed(InstallChoice::Frontend);
    let suggest_backend =
        request.path().join(REQUIREMENTS_FILE).exists() && !installed_backend;
    let suggest_frontend =
        request.path().join(installers::PACKAGE_MANIFEST).exists() && !installed_frontend;

    println!();
    println!("  Next steps");
    println!();

    let mut step = 1;
    println!("  {}. {}", step, format!("cd {}", request.name()).cyan());
    step += 1;

    if !options.skip_all_install && (suggest_backend || suggest_frontend) {
        println!("  {}. Install dependencies manually if needed:", step);
        if suggest_backend {
            println!(
                "     Backend:  {} (or equivalent for your OS)",
                "python3 -m venv venv && source venv/bin/activate && pip install -r requirements.txt"
                    .cyan()
            );
        }
        if suggest_frontend {
            println!("     Frontend: {}", "pnpm install".cyan());
        }
        step += 1;
    }

    if installed_backend && !options.no_venv {
        let activate = if cfg!(target_os = "windows") {
            "venv\\Scripts\\activate"
        } else {
            "source venv/bin/activate"
        };
        println!(
            "  {}. Activate the Python virtual environment: {}",
            step,
            activate.cyan()
        );
        step += 1;
    }

    println!(
        "  {}. Start the development server (if applicable): {}",
        step,
        "pnpm run dev".cyan()
    );

    println!();
    println!(
        "{}",
        "  For more details, check the README.md inside your new project.".dimmed()
    );
}
