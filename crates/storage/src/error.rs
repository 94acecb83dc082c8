//! Error types for blob storage operations.

use thiserror::Error;

/// Errors that can occur while talking to the storage gateway.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("blob upload failed: {0}")]
    UploadFailed(String),

    #[error("blob retrieval failed: {0}")]
    RetrievalFailed(String),

    #[error("blob not found: {0}")]
    NotFound(String),

    #[error("metadata document could not be encoded or decoded: {0}")]
    InvalidDocument(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;
