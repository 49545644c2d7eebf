//! Glass error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by glass widgets
///
/// Runtime measurement never fails; only loading configuration from disk
/// does.
#[derive(Error, Debug)]
pub enum GlassError {
    /// Failed to read a configuration file
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration text is not valid TOML for the expected schema
    #[error("Invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

/// Result type for glass operations
pub type Result<T> = std::result::Result<T, GlassError>;
