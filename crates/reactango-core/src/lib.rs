//! ReactTango Core - Shared library for the project bootstrapping CLI
//!
//! This library provides the core functionality for creating new ReactTango
//! projects: cloning the template repository, resetting version control, and
//! installing backend (Python) and frontend (Node) dependencies.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Execution primitives** - Command running and PATH probing
//!   behind trait seams (`CommandRunner`, `EnvironmentProbe`)
//! - **Layer 2: Installers** - Backend/frontend dependency installation and
//!   the plan that decides which of them run
//! - **Layer 3: Bootstrap driver** - `ProjectBootstrapper` wiring the whole
//!   clone/init/install sequence together
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based `Prompter` implementation
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use reactango_core::{
//!     bootstrap::{BootstrapOptions, ProjectBootstrapper},
//!     probe::SystemProbe,
//!     project::ProjectRequest,
//!     shell::SystemRunner,
//! };
//!
//! let request = ProjectRequest::new("my-app", None)?;
//! let bootstrapper = ProjectBootstrapper::new(&SystemRunner, &SystemProbe, &prompter);
//! let outcome = bootstrapper.run(&request, &BootstrapOptions::default()).await?;
//! ```

pub mod bootstrap;
pub mod installers;
pub mod log;
pub mod probe;
pub mod project;
pub mod prompt;
pub mod shell;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export main types for convenience
pub use bootstrap::{BootstrapError, BootstrapOptions, ProjectBootstrapper};
pub use installers::{InstallChoice, InstallOutcome, InstallPlan, InstallSelection, ManifestSet};
pub use probe::{EnvironmentProbe, SystemProbe};
pub use project::ProjectRequest;
pub use prompt::Prompter;
pub use shell::{CommandResult, CommandRunner, CommandSpec, OutputMode, SystemRunner};

#[cfg(feature = "tui")]
pub use prompt::CliclackPrompter;
