//! Error types for Grantview.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Grantview operations.
pub type Result<T> = std::result::Result<T, GrantviewError>;

/// Errors that can occur in Grantview.
#[derive(Debug, Error)]
pub enum GrantviewError {
    /// Transport-level failure talking to the remote store.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote store answered with a non-success status.
    #[error("Remote store returned {status}: {body}")]
    RemoteStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, as far as it could be read.
        body: String,
    },

    /// A payload could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to open or parse a local dataset file.
    #[error("Failed to load data file: {path}")]
    DataFile {
        /// Path of the dataset file.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Shared in-process state became unusable.
    #[error("Internal state error: {0}")]
    State(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GrantviewError {
    /// Create a RemoteStatus error.
    pub fn remote_status(status: u16, body: impl Into<String>) -> Self {
        Self::RemoteStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a DataFile error.
    pub fn data_file(
        path: PathBuf,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::DataFile {
            path,
            source: source.into(),
        }
    }

    /// Create a State error.
    pub fn state(message: impl Into<String>) -> Self {
        Self::State(message.into())
    }

    /// Create a Config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
