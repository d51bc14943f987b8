//! Error types for metadata operations.

use postpos_types::ItemId;
use thiserror::Error;

/// Errors that can occur while reading or writing position metadata.
#[derive(Debug, Error)]
pub enum MetaError {
    /// The metadata field name is empty.
    #[error("invalid field name: {0:?}")]
    InvalidFieldName(String),

    /// An item with this id is already in the catalog.
    #[error("duplicate content item: {0}")]
    DuplicateItem(ItemId),

    /// A lock guarding shared state was poisoned by a panicking writer.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error during file-based operations.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for metadata operations.
pub type Result<T> = std::result::Result<T, MetaError>;
