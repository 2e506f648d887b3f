//! `navmenu build` command implementation.

use clap::Args;

use super::MenuArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    menu: MenuArgs,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if the menu can't be resolved or written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let menu = self.menu.resolve()?;

        let json = if self.pretty {
            serde_json::to_string_pretty(&menu)?
        } else {
            serde_json::to_string(&menu)?
        };
        Output::new().result(&json)?;

        Ok(())
    }
}
