//! Error types for sync backends

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the local cache backend
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to create cache directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read cache file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write cache file {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode cache payload")]
    Encode(#[source] serde_json::Error),

    #[error("malformed cache file {path}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from the remote store backend
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote request failed")]
    Request(#[from] reqwest::Error),

    #[error("remote rejected {operation}: status {status}")]
    Status { operation: &'static str, status: u16 },

    #[error("malformed remote response")]
    Malformed(#[source] reqwest::Error),
}
