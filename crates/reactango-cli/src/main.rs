//! reactango CLI - Create ReactTango projects from the template repository

use clap::{Parser, Subcommand};
use reactango_core::bootstrap::{BootstrapOptions, ProjectBootstrapper};
use reactango_core::probe::SystemProbe;
use reactango_core::project::ProjectRequest;
use reactango_core::prompt::CliclackPrompter;
use reactango_core::shell::SystemRunner;
use reactango_core::{log, InstallOutcome};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "reactango")]
#[command(about = "ReactTango CLI - Create and manage ReactTango projects")]
#[command(version = CLI_VERSION)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new ReactTango project from the template
    Create(CreateArgs),
}

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Name of the project directory to create
    pub project_name: String,

    /// Branch of the template to clone (e.g., 'main', 'develop')
    #[arg(long)]
    pub branch: Option<String>,

    /// Force initialization of a new git repository
    #[arg(long, conflicts_with = "no_init_git")]
    pub init_git: bool,

    /// Force skipping git initialization
    #[arg(long)]
    pub no_init_git: bool,

    /// Automatically install all available dependencies (backend & frontend)
    #[arg(long)]
    pub install_all: bool,

    /// Skip all automatic dependency installations and prompts
    #[arg(long)]
    pub skip_all_install: bool,

    /// Don't use a Python virtual environment for backend dependencies
    #[arg(long)]
    pub no_venv: bool,
}

impl CreateArgs {
    fn bootstrap_options(&self) -> BootstrapOptions {
        BootstrapOptions {
            init_git: if self.init_git {
                Some(true)
            } else if self.no_init_git {
                Some(false)
            } else {
                None
            },
            install_all: self.install_all,
            skip_all_install: self.skip_all_install,
            no_venv: self.no_venv,
        }
    }
}

#[tokio::main]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    let exit_code = match args.command {
        Command::Create(create_args) => {
            let code = run_create(&create_args).await;
            let _ = console::Term::stderr().show_cursor();
            code
        }
    };

    std::process::exit(exit_code);
}

async fn run_create(args: &CreateArgs) -> i32 {
    let request = match ProjectRequest::new(&args.project_name, args.branch.clone()) {
        Ok(request) => request,
        Err(e) => {
            log::error(e.to_string());
            return 1;
        }
    };

    let runner = SystemRunner;
    let probe = SystemProbe;
    let prompter = CliclackPrompter;
    let bootstrapper = ProjectBootstrapper::new(&runner, &probe, &prompter);

    match bootstrapper.run(&request, &args.bootstrap_options()).await {
        Ok(outcome) => exit_code_for(&outcome),
        Err(e) => {
            log::error(format!(
                "An unexpected error occurred during project creation: {e}"
            ));
            1
        }
    }
}

/// The project was created either way, but a failed installer still makes the
/// run non-zero so scripts can react
fn exit_code_for(outcome: &InstallOutcome) -> i32 {
    if outcome.overall_success() {
        0
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use reactango_core::InstallChoice;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn git_force_flags_are_mutually_exclusive() {
        let result = Args::try_parse_from([
            "reactango",
            "create",
            "demo-app",
            "--init-git",
            "--no-init-git",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn flags_map_onto_bootstrap_options() {
        let args = Args::try_parse_from([
            "reactango",
            "create",
            "demo-app",
            "--branch",
            "develop",
            "--no-init-git",
            "--skip-all-install",
            "--no-venv",
        ])
        .unwrap();

        let Command::Create(create) = args.command;
        assert_eq!(create.project_name, "demo-app");
        assert_eq!(create.branch.as_deref(), Some("develop"));

        let options = create.bootstrap_options();
        assert_eq!(options.init_git, Some(false));
        assert!(options.skip_all_install);
        assert!(options.no_venv);
        assert!(!options.install_all);
    }

    #[test]
    fn partial_install_failure_exits_nonzero() {
        let outcome = InstallOutcome {
            attempted: vec![InstallChoice::Backend, InstallChoice::Frontend],
            succeeded: vec![InstallChoice::Frontend],
        };
        assert_eq!(exit_code_for(&outcome), 1);

        let clean = InstallOutcome::default();
        assert_eq!(exit_code_for(&clean), 0);
    }
}
