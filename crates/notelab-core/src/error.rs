//! Sync client error handling
//!
//! Typed errors for everything that talks to the hosted sync service or its
//! on-disk cache.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by a [`SyncClient`](crate::sync::SyncClient)
#[derive(Error, Debug)]
pub enum ClientError {
    /// No sync service URL configured
    #[error("Sync service not configured. Set it with: notelab config set sync_url <url>")]
    NotConfigured,

    /// Transport-level failure talking to the service
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("{message} (HTTP {status})")]
    Rejected { status: u16, message: String },

    /// Failed to read or write a cache file
    #[error("Cache file '{path}': {source}")]
    Cache {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A cache file exists but cannot be parsed
    #[error("Cache file '{path}' is corrupted: {details}")]
    CorruptCache { path: PathBuf, details: String },

    /// Free-form failure description from the service or a client implementation
    #[error("{0}")]
    Service(String),
}

impl ClientError {
    /// Wrap an I/O error with the cache path it happened on
    pub fn cache(source: io::Error, path: impl Into<PathBuf>) -> Self {
        ClientError::Cache {
            path: path.into(),
            source,
        }
    }

    /// Whether the failure happened before reaching the service
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Http(e) if e.is_connect() || e.is_timeout() || e.is_request())
    }
}
