//! Configuration management for navmenu.
//!
//! Parses `navmenu.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ```toml
//! [content]
//! snapshot = "content.json"
//!
//! [request]
//! authenticated = false
//! current = "8f4c1a52-51f0-4b8e-9d1e-0d5d3c0b1a2f"
//!
//! [menus.main]
//! allow_description = true
//! allow_custom_classes = true
//! allow_image_icon = false
//! hide_noopener = false
//! hide_noreferrer = false
//! hide_include_children = false
//! max_depth = 2
//! ```
//!
//! Each `[menus.<name>]` table holds the settings an editor picks for one
//! navigation property; [`MenuSettings::to_build_options`] turns them into
//! the [`BuildOptions`] the builder consumes.
//!
//! CLI settings can be applied during load via [`CliSettings`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use navmenu_model::BuildOptions;
use serde::Deserialize;
use uuid::Uuid;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "navmenu.toml";

/// Default content snapshot filename, relative to the config directory.
const DEFAULT_SNAPSHOT: &str = "content.json";

/// Deepest `max_depth` accepted in configuration.
const MAX_DEPTH_LIMIT: u32 = 32;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content snapshot path.
    pub snapshot: Option<PathBuf>,
    /// Override the viewer's login state.
    pub authenticated: Option<bool>,
    /// Override the page being rendered.
    pub current: Option<Uuid>,
    /// Override `max_depth` for whichever menu is built.
    pub max_depth: Option<u32>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content source configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Request context used when building menus outside a web request.
    pub request: RequestConfig,
    /// Named menu configurations.
    pub menus: BTreeMap<String, MenuSettings>,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// `max_depth` from CLI settings, applied on top of any menu's settings.
    #[serde(skip)]
    max_depth_override: Option<u32>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw content configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    snapshot: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// JSON snapshot of the content tree.
    pub snapshot: PathBuf,
}

/// Request context defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    /// Build menus as seen by a logged-in viewer.
    pub authenticated: bool,
    /// Key of the page being rendered.
    pub current: Option<Uuid>,
}

/// Settings of one navigation menu.
///
/// Every switch defaults to `false`, so a menu strips descriptions, custom
/// classes and images unless it opts in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MenuSettings {
    /// Keep item descriptions.
    pub allow_description: bool,
    /// Keep custom CSS classes.
    pub allow_custom_classes: bool,
    /// Keep image references and resolve the first one.
    pub allow_image_icon: bool,
    /// Drop `noopener` from every item.
    pub hide_noopener: bool,
    /// Drop `noreferrer` from every item.
    pub hide_noreferrer: bool,
    /// Ignore `includeChildNodes` on every item.
    pub hide_include_children: bool,
    /// Maximum number of levels (`0` means unlimited).
    pub max_depth: u32,
}

impl MenuSettings {
    /// Build options for this menu.
    #[must_use]
    pub fn to_build_options(&self) -> BuildOptions {
        BuildOptions {
            remove_noopener: self.hide_noopener,
            remove_noreferrer: self.hide_noreferrer,
            hide_include_children: self.hide_include_children,
            remove_description: !self.allow_description,
            remove_custom_classes: !self.allow_custom_classes,
            remove_images: !self.allow_image_icon,
            max_depth: self.max_depth,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Requested menu has no `[menus.<name>]` table.
    #[error("Unknown menu: {0}")]
    UnknownMenu(String),
}

fn require_max_depth(max_depth: u32, field: &str) -> Result<(), ConfigError> {
    if max_depth > MAX_DEPTH_LIMIT {
        return Err(ConfigError::Validation(format!(
            "{field} cannot exceed {MAX_DEPTH_LIMIT}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `navmenu.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the result is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Settings of the menu called `name`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownMenu` if there is no `[menus.<name>]` table.
    pub fn menu(&self, name: &str) -> Result<&MenuSettings, ConfigError> {
        self.menus
            .get(name)
            .ok_or_else(|| ConfigError::UnknownMenu(name.to_owned()))
    }

    /// Build options for `menu`, or defaults when no menu is named.
    ///
    /// A `max_depth` given through [`CliSettings`] replaces the menu's own.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownMenu` if `menu` names no configured menu.
    pub fn build_options(&self, menu: Option<&str>) -> Result<BuildOptions, ConfigError> {
        let mut options = match menu {
            Some(name) => self.menu(name)?.to_build_options(),
            None => BuildOptions::default(),
        };
        if let Some(max_depth) = self.max_depth_override {
            options.max_depth = max_depth;
        }
        Ok(options)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(snapshot) = &settings.snapshot {
            self.content_resolved.snapshot.clone_from(snapshot);
        }
        if let Some(authenticated) = settings.authenticated {
            self.request.authenticated = authenticated;
        }
        if let Some(current) = settings.current {
            self.request.current = Some(current);
        }
        if let Some(max_depth) = settings.max_depth {
            self.max_depth_override = Some(max_depth);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            content: ContentConfigRaw::default(),
            request: RequestConfig::default(),
            menus: BTreeMap::new(),
            content_resolved: ContentConfig {
                snapshot: base.join(DEFAULT_SNAPSHOT),
            },
            max_depth_override: None,
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after applying CLI
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content_resolved.snapshot.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "content.snapshot cannot be empty".to_owned(),
            ));
        }
        for (name, menu) in &self.menus {
            require_max_depth(menu.max_depth, &format!("menus.{name}.max_depth"))?;
        }
        if let Some(max_depth) = self.max_depth_override {
            require_max_depth(max_depth, "max_depth")?;
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let snapshot = self.content.snapshot.as_deref().unwrap_or(DEFAULT_SNAPSHOT);
        // An empty value stays empty so validation can reject it
        self.content_resolved = ContentConfig {
            snapshot: if snapshot.is_empty() {
                PathBuf::new()
            } else {
                config_dir.join(snapshot)
            },
        };
    }
}
