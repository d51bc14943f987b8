use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a [`crate::PluginConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("metadata error: {0}")]
    Meta(#[from] postpos_meta::MetaError),

    #[error("item not found: {0}")]
    ItemNotFound(postpos_types::ItemId),
}

pub type SdkResult<T> = Result<T, SdkError>;
