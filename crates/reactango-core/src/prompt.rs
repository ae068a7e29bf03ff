//! Interactive prompt seam
//!
//! The bootstrap flow only ever needs two questions answered, so the trait
//! stays small and a scripted implementation can stand in during tests.

use crate::installers::InstallSelection;
use anyhow::Result;

/// Capability interface for the interactive decisions in the bootstrap flow
pub trait Prompter: Send + Sync {
    /// Yes/no question with a default answer
    fn confirm(&self, question: &str, default: bool) -> Result<bool>;

    /// Pick one install selection from the offered options
    fn select_install(&self, options: &[InstallSelection]) -> Result<InstallSelection>;
}

/// Charm-style prompts using cliclack
#[cfg(feature = "tui")]
pub struct CliclackPrompter;

#[cfg(feature = "tui")]
impl Prompter for CliclackPrompter {
    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        let answer = cliclack::confirm(question).initial_value(default).interact()?;
        Ok(answer)
    }

    fn select_install(&self, options: &[InstallSelection]) -> Result<InstallSelection> {
        let mut select = cliclack::select("What dependencies would you like to install?");
        for option in options {
            select = select.item(*option, option.display_name(), "");
        }
        let selection = select.interact()?;
        Ok(selection)
    }
}
