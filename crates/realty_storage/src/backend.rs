//! Storage backend trait definition.

use crate::error::StorageResult;

/// An append-only byte store.
///
/// # Invariants
///
/// - `append` returns the offset of the first written byte
/// - `read_at` returns exactly the bytes previously appended at that offset
/// - after `flush` returns, appended bytes survive a process exit
/// - `truncate` only ever shrinks the store
pub trait StorageBackend: Send + Sync {
    /// Reads `len` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Fails if the range extends past the end of the store or the
    /// underlying medium fails.
    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>>;

    /// Appends `data` and returns the offset it was written at.
    ///
    /// # Errors
    ///
    /// Fails if the underlying medium rejects the write.
    fn append(&mut self, data: &[u8]) -> StorageResult<u64>;

    /// Pushes buffered writes to the medium.
    ///
    /// # Errors
    ///
    /// Fails if the flush fails.
    fn flush(&mut self) -> StorageResult<()>;

    /// Like `flush`, and also persists metadata such as the file length.
    ///
    /// # Errors
    ///
    /// Fails if the sync fails.
    fn sync(&mut self) -> StorageResult<()>;

    /// Returns the number of bytes in the store.
    ///
    /// # Errors
    ///
    /// Fails if the size cannot be determined.
    fn size(&self) -> StorageResult<u64>;

    /// Drops every byte at or after `new_size`.
    ///
    /// Used to cut a torn, uncommitted tail off the journal.
    ///
    /// # Errors
    ///
    /// Fails if `new_size` exceeds the current size or the medium fails.
    fn truncate(&mut self, new_size: u64) -> StorageResult<()>;

    /// Short human-readable description, used in logs and `realty inspect`.
    fn describe(&self) -> String;
}
