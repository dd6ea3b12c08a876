use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LyricWikiError {
    #[error("LyricWiki error: {0}")]
    Generic(String),
    #[error(transparent)]
    Expected(#[from] ExpectedError),
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),
}

/// Errors caused by user input rather than by the crate itself. These are safe to print as-is.
#[derive(Error, Debug)]
pub enum ExpectedError {
    #[error("{0}")]
    Generic(String),
    #[error("Configuration file not found ({path})")]
    ConfigNotFound { path: PathBuf },
    #[error("Failed to decode configuration file ({path}): {message}")]
    ConfigDecode { path: PathBuf, message: String },
    #[error("Invalid value for {key} in configuration file: {message}")]
    InvalidConfigValue { key: String, message: String },
}

pub type Result<T> = std::result::Result<T, LyricWikiError>;
