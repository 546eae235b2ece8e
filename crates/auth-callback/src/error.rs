//! Error types for callback handling.
//!
//! `CallbackError` has no verification variant: the handler turns failed
//! logins into a user-facing notice instead of returning them.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CallbackError {
    #[error("Invalid callback URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Callback has already been handled")]
    AlreadyHandled,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure reported by an `Authenticator`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The verification call was rejected (e.g. a failed promise).
    #[error("Token verification rejected: {0}")]
    Rejected(String),

    /// The verifier could not be reached.
    #[error("Transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, CallbackError>;
