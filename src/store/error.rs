//! Error types for the document store

use thiserror::Error;

/// Errors that can occur while loading or persisting the document tree
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted document is not valid JSON
    #[error("Store serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The persisted document is valid JSON but not an object
    #[error("Store root must be a JSON object, found {0}")]
    InvalidRoot(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
