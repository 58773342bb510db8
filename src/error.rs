//! Error types for the bookmark store and its storage backends.

use thiserror::Error;

/// A required form field was left blank.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title is required")]
    MissingTitle,

    #[error("url is required")]
    MissingUrl,
}

/// Failure reading or writing a storage key.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to access storage key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize bookmarks: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The primary error type for store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The referenced bookmark id is not in the collection.
    #[error("bookmark not found with ID {0}")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
