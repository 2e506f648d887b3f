//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod check;
pub(crate) mod outline;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use navmenu_builder::{MenuBuilder, MenuItem, RequestContext};
use navmenu_config::{CliSettings, Config};
use navmenu_content::SnapshotResolver;
use uuid::Uuid;

use crate::error::CliError;

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;
pub(crate) use outline::OutlineArgs;

/// Arguments shared by commands that resolve a menu.
#[derive(Args)]
pub(crate) struct MenuArgs {
    /// Path to the stored menu tree (JSON).
    tree: PathBuf,

    /// Menu settings to apply (a `[menus.<name>]` table in the config).
    #[arg(short, long)]
    menu: Option<String>,

    /// Path to configuration file (default: auto-discover navmenu.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content snapshot to resolve against (overrides config).
    #[arg(short, long, env = "NAVMENU_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Build the menu for a logged-in viewer (overrides config).
    ///
    /// `--authenticated=false` forces an anonymous viewer.
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    authenticated: Option<bool>,

    /// Key of the page being rendered (overrides config).
    #[arg(long)]
    current: Option<Uuid>,

    /// Maximum number of levels, 0 for unlimited (overrides config).
    #[arg(long)]
    max_depth: Option<u32>,
}

impl MenuArgs {
    /// Load configuration, content and the stored tree, then resolve the menu.
    ///
    /// # Errors
    ///
    /// Returns an error if any input can't be loaded or the resolver fails.
    pub(crate) fn resolve(&self) -> Result<Vec<MenuItem>, CliError> {
        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        let options = config.build_options(self.menu.as_deref())?;

        let items = navmenu_model::load_items(&self.tree)?;
        let resolver = SnapshotResolver::from_path(&config.content_resolved.snapshot)?;
        let ctx = RequestContext {
            is_authenticated: config.request.authenticated,
            current_content_key: config.request.current,
        };

        tracing::info!(
            tree = %self.tree.display(),
            menu = self.menu.as_deref().unwrap_or("default"),
            documents = resolver.document_count(),
            media = resolver.media_count(),
            "Resolving menu"
        );

        let builder = MenuBuilder::new(Arc::new(resolver));
        Ok(builder.try_build_menu(&items, options, &ctx)?)
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            snapshot: self.snapshot.clone(),
            authenticated: self.authenticated,
            current: self.current,
            max_depth: self.max_depth,
        }
    }
}
