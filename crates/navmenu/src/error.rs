//! CLI error types.

use navmenu_builder::BuildError;
use navmenu_config::ConfigError;
use navmenu_content::ContentError;
use navmenu_model::ModelError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Model(#[from] ModelError),

    #[error("{0}")]
    Content(#[from] ContentError),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
