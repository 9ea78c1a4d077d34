//! Error types for storage operations.

use std::io;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by a storage backend.
///
/// Every variant is an infrastructure failure; callers above the journal
/// treat them as retryable.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The operating system rejected the operation.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A read asked for bytes that were never written.
    #[error("read beyond end of storage: offset {offset}, len {len}, size {size}")]
    ReadPastEnd {
        /// Requested offset.
        offset: u64,
        /// Requested length.
        len: usize,
        /// Size of the store at the time of the read.
        size: u64,
    },

    /// Truncation to a size larger than the store.
    #[error("cannot truncate to {requested} bytes, store holds {size}")]
    TruncateBeyondEnd {
        /// Requested size.
        requested: u64,
        /// Current size.
        size: u64,
    },

    /// The backend has been taken offline.
    #[error("storage is unavailable: {0}")]
    Unavailable(String),
}
