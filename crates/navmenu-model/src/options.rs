//! Per-build options controlling field stripping and depth limits.

use serde::{Deserialize, Serialize};

/// Options for a single menu build.
///
/// All switches default to `false` and `max_depth` defaults to `0`
/// (unlimited). The value is copied into the builder and never changes
/// during a build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildOptions {
    /// Clear `noopener` on every item.
    pub remove_noopener: bool,
    /// Clear `noreferrer` on every item.
    pub remove_noreferrer: bool,
    /// Ignore `includeChildNodes` on every item.
    pub hide_include_children: bool,
    /// Clear `description` on every item.
    pub remove_description: bool,
    /// Clear `customClasses` on every item.
    pub remove_custom_classes: bool,
    /// Drop image references and skip image resolution.
    pub remove_images: bool,
    /// Maximum number of levels in the output (`0` means unlimited).
    pub max_depth: u32,
}

impl BuildOptions {
    /// Whether an item at zero-based `level` must be emitted without children.
    #[must_use]
    pub fn is_leaf_level(&self, level: u32) -> bool {
        self.max_depth > 0 && level >= self.max_depth - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_all_off() {
        let options = BuildOptions::default();

        assert!(!options.remove_noopener);
        assert!(!options.remove_noreferrer);
        assert!(!options.hide_include_children);
        assert!(!options.remove_description);
        assert!(!options.remove_custom_classes);
        assert!(!options.remove_images);
        assert_eq!(options.max_depth, 0);
    }

    #[test]
    fn test_is_leaf_level_unlimited() {
        let options = BuildOptions::default();

        assert!(!options.is_leaf_level(0));
        assert!(!options.is_leaf_level(100));
    }

    #[test]
    fn test_is_leaf_level_with_max_depth() {
        let options = BuildOptions {
            max_depth: 2,
            ..Default::default()
        };

        assert!(!options.is_leaf_level(0));
        assert!(options.is_leaf_level(1));
        assert!(options.is_leaf_level(2));
    }

    #[test]
    fn test_deserialize_partial_json() {
        let options: BuildOptions =
            serde_json::from_str(r#"{"removeNoopener": true, "maxDepth": 3}"#).unwrap();

        assert!(options.remove_noopener);
        assert!(!options.remove_images);
        assert_eq!(options.max_depth, 3);
    }
}
