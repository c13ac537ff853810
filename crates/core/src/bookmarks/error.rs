//! Error types for bookmark persistence.

use crate::storage::StorageError;
use thiserror::Error;

/// Errors that can occur while saving the bookmark collection.
///
/// Loading never fails: unreadable or malformed data yields an empty
/// collection.
#[derive(Error, Debug)]
pub enum BookmarkError {
    /// The collection could not be written to the key-value layer.
    #[error("Failed to persist bookmarks: {0}")]
    Persistence(#[from] StorageError),

    /// The collection could not be serialized.
    #[error("Failed to encode bookmarks: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Type alias for Result with BookmarkError.
pub type BookmarkResult<T> = Result<T, BookmarkError>;
