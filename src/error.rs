//! Custom error types for phpup.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhpupError {
    #[error("Configuration file not found: {path}")]
    ConfigMissing { path: String },

    #[error("Key '{key}' not found in {path}")]
    IniKeyMissing { key: String, path: String },

    #[error("PHP {version} is not installed")]
    VersionNotInstalled { version: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
