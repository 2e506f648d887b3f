//! `navmenu check` command implementation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;
use navmenu_model::NavItem;
use uuid::Uuid;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to the stored menu tree (JSON).
    tree: PathBuf,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree can't be parsed or has duplicate keys.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let items = navmenu_model::load_items(&self.tree)?;
        let report = CheckReport::new(&items);

        output.info(&format!(
            "{}: {} items",
            self.tree.display(),
            report.total
        ));
        for (item_type, count) in &report.by_type {
            output.info(&format!("  {item_type}: {count}"));
        }
        if report.missing_keys > 0 {
            output.warning(&format!("{} item(s) without a key", report.missing_keys));
        }

        if !report.duplicates.is_empty() {
            for key in &report.duplicates {
                output.warning(&format!("Duplicate key: {key}"));
            }
            return Err(CliError::Validation(format!(
                "{} duplicate key(s) in {}",
                report.duplicates.len(),
                self.tree.display()
            )));
        }

        output.success("No problems found");
        Ok(())
    }
}

/// Summary of a stored tree.
#[derive(Debug, PartialEq, Eq)]
struct CheckReport {
    total: usize,
    by_type: BTreeMap<String, usize>,
    duplicates: Vec<Uuid>,
    missing_keys: usize,
}

impl CheckReport {
    fn new(items: &[NavItem]) -> Self {
        let mut total = 0;
        let mut by_type = BTreeMap::new();
        for item in items.iter().flat_map(NavItem::walk) {
            total += 1;
            let name = match item.item_type.as_str() {
                "" => "(untyped)".to_owned(),
                other => other.to_owned(),
            };
            *by_type.entry(name).or_insert(0) += 1;
        }

        Self {
            total,
            by_type,
            duplicates: navmenu_model::find_duplicate_keys(items),
            missing_keys: navmenu_model::count_missing_keys(items),
        }
    }
}
