//! Error types
//!
//! Interaction itself never fails: missing objects, lost tracking and empty
//! hit tests are ordinary outcomes. Only loading configuration can error.

use std::path::PathBuf;

/// Errors raised while loading an `InteractionConfig`
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid {name}: {value} (must be a finite number greater than zero)")]
    InvalidThreshold { name: &'static str, value: f32 },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
