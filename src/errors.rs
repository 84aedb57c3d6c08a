// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WslctlError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid timeout for '{0}': must be at least 1ms")]
    InvalidTimeout(String),

    #[error("Stream reader for '{program}' failed: {source}")]
    ReaderFailed {
        program: String,
        #[source]
        source: tokio::task::JoinError,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, WslctlError>;
