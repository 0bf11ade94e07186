//! Error types for writing snapshots.

use thiserror::Error;

/// Errors from serializing or persisting a snapshot document.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to write snapshot to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize snapshot: {0}")]
    Serialization(#[from] serde_json::Error),
}
