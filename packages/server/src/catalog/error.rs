use common::storage::StorageError;
use thiserror::Error;

/// Failures of the ingestion pipeline. Each message embeds its cause.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required field is missing, empty, or out of bounds.
    #[error("{0}")]
    Validation(String),

    /// The image stream or a lookup could not be read.
    #[error("{0}")]
    Read(String),

    /// The image file or a table row could not be written.
    #[error("{0}")]
    Write(String),

    /// The referenced category does not exist.
    #[error("{0}")]
    NotFound(String),
}

impl CatalogError {
    /// Classify a storage failure, prefixing `context` to its message.
    pub fn from_storage(context: &str, err: StorageError) -> Self {
        let message = format!("{context}: {err}");
        match err {
            StorageError::SizeLimitExceeded { .. }
            | StorageError::InvalidName(_)
            | StorageError::InvalidHash(_) => CatalogError::Validation(message),
            StorageError::Read(_) => CatalogError::Read(message),
            StorageError::NotFound(_) => CatalogError::NotFound(message),
            StorageError::Write(_) | StorageError::Io(_) => CatalogError::Write(message),
        }
    }
}
