//! Navigation item model for navmenu.
//!
//! This crate defines the stored form of a navigation menu:
//! - [`NavItem`]: one node of the authored tree, with its JSON contract
//! - [`ItemType`]: open, string-backed item kind
//! - [`BuildOptions`]: switches consumed by the menu builder
//!
//! Stored trees are JSON arrays of items. Use [`parse_items`] to read one and
//! [`to_json`] to write it back.
//!
//! # Example
//!
//! ```
//! use navmenu_model::parse_items;
//!
//! let items = parse_items(r#"[{"name": "Home", "itemType": "External", "url": "/"}]"#)?;
//! assert_eq!(items[0].name, "Home");
//! # Ok::<(), navmenu_model::ModelError>(())
//! ```

mod item;
mod options;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use uuid::Uuid;

pub use item::{ImageRef, ItemType, NavItem, Variants, Walk};
pub use options::BuildOptions;

/// Error reading a stored navigation tree.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Malformed JSON or a node missing a required field.
    #[error("Invalid navigation tree: {0}")]
    Parse(#[from] serde_json::Error),
    /// Tree file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parse a stored navigation tree (a JSON array of items).
///
/// An empty or whitespace-only document is treated as an empty tree.
///
/// # Errors
///
/// Returns [`ModelError::Parse`] for malformed JSON or when any node lacks
/// `name`.
pub fn parse_items(json: &str) -> Result<Vec<NavItem>, ModelError> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(json)?)
}

/// Parse a single stored navigation item.
pub fn parse_item(json: &str) -> Result<NavItem, ModelError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a stored navigation tree from a file.
pub fn load_items(path: &Path) -> Result<Vec<NavItem>, ModelError> {
    let content = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_items(&content)
}

/// Serialize a navigation tree to its stored JSON form.
pub fn to_json(items: &[NavItem]) -> Result<String, ModelError> {
    Ok(serde_json::to_string(items)?)
}

/// Keys that occur more than once anywhere in the tree.
///
/// Each duplicated key is reported once, in the order its second
/// occurrence is found. Items without a key (the nil UUID) are not
/// counted; see [`count_missing_keys`].
#[must_use]
pub fn find_duplicate_keys(items: &[NavItem]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for item in items.iter().flat_map(NavItem::walk) {
        if item.key.is_nil() {
            continue;
        }
        if !seen.insert(item.key) && reported.insert(item.key) {
            duplicates.push(item.key);
        }
    }

    duplicates
}

/// Number of items anywhere in the tree stored without a key.
#[must_use]
pub fn count_missing_keys(items: &[NavItem]) -> usize {
    items
        .iter()
        .flat_map(NavItem::walk)
        .filter(|item| item.key.is_nil())
        .count()
}
