//! `navmenu outline` command implementation.

use clap::Args;
use navmenu_builder::MenuItem;

use super::MenuArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the outline command.
#[derive(Args)]
pub(crate) struct OutlineArgs {
    #[command(flatten)]
    menu: MenuArgs,

    /// Culture code for item names and descriptions (e.g. en-US).
    #[arg(long)]
    culture: Option<String>,
}

impl OutlineArgs {
    /// Execute the outline command.
    ///
    /// # Errors
    ///
    /// Returns an error if the menu can't be resolved or written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let menu = self.menu.resolve()?;

        if menu.is_empty() {
            output.warning("Menu is empty");
            return Ok(());
        }

        let culture = self.culture.as_deref();
        for root in &menu {
            write_item(&output, root, culture, 0)?;
        }

        Ok(())
    }
}

fn write_item(
    output: &Output,
    item: &MenuItem,
    culture: Option<&str>,
    depth: usize,
) -> Result<(), CliError> {
    let name = item.display_name(culture);
    let name = if item.is_active {
        output.highlighted(name)
    } else {
        name.to_owned()
    };

    let mut line = format!("{}- {name}", "  ".repeat(depth));
    if let Some(target) = link_target(item) {
        line.push(' ');
        line.push_str(&output.dimmed(&target));
    }
    output.result(&line)?;

    for child in item.children() {
        write_item(output, child, culture, depth + 1)?;
    }
    Ok(())
}

/// Link shown next to an item: href, `rel` and `target` when set.
fn link_target(item: &MenuItem) -> Option<String> {
    if !item.is_link() {
        return None;
    }

    let mut target = item.href();
    if let Some(rel) = item.rel() {
        target.push_str(&format!(" rel=\"{rel}\""));
    }
    if let Some(window) = item.item.target.as_deref().filter(|t| !t.is_empty()) {
        target.push_str(&format!(" target=\"{window}\""));
    }
    Some(format!("({target})"))
}
