//! In-memory storage backend.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};
use parking_lot::RwLock;

/// Keeps the whole journal in a `Vec<u8>`.
///
/// Nothing survives the process, but [`InMemoryBackend::data`] and
/// [`InMemoryBackend::with_data`] let tests carry the bytes into a fresh
/// store to exercise replay.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    data: RwLock<Vec<u8>>,
}

impl InMemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend preloaded with `data`.
    #[must_use]
    pub fn with_data(data: Vec<u8>) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    /// Returns a copy of the stored bytes.
    #[must_use]
    pub fn data(&self) -> Vec<u8> {
        self.data.read().clone()
    }
}

impl StorageBackend for InMemoryBackend {
    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>> {
        let data = self.data.read();
        let size = data.len() as u64;
        let end = offset.saturating_add(len as u64);
        if end > size {
            return Err(StorageError::ReadPastEnd { offset, len, size });
        }
        let start = offset as usize;
        Ok(data[start..start + len].to_vec())
    }

    fn append(&mut self, bytes: &[u8]) -> StorageResult<u64> {
        let mut data = self.data.write();
        let offset = data.len() as u64;
        data.extend_from_slice(bytes);
        Ok(offset)
    }

    fn flush(&mut self) -> StorageResult<()> {
        Ok(())
    }

    fn sync(&mut self) -> StorageResult<()> {
        Ok(())
    }

    fn size(&self) -> StorageResult<u64> {
        Ok(self.data.read().len() as u64)
    }

    fn truncate(&mut self, new_size: u64) -> StorageResult<()> {
        let mut data = self.data.write();
        let size = data.len() as u64;
        if new_size > size {
            return Err(StorageError::TruncateBeyondEnd {
                requested: new_size,
                size,
            });
        }
        data.truncate(new_size as usize);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("memory ({} bytes)", self.data.read().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_returns_running_offsets() {
        let mut backend = InMemoryBackend::new();
        assert_eq!(backend.append(b"house").unwrap(), 0);
        assert_eq!(backend.append(b"condo").unwrap(), 5);
        assert_eq!(backend.size().unwrap(), 10);
    }

    #[test]
    fn read_back_slices() {
        let mut backend = InMemoryBackend::new();
        backend.append(b"house condo").unwrap();
        assert_eq!(backend.read_at(6, 5).unwrap(), b"condo");
        assert!(backend.read_at(3, 0).unwrap().is_empty());
    }

    #[test]
    fn read_past_end_fails() {
        let mut backend = InMemoryBackend::new();
        backend.append(b"villa").unwrap();
        assert!(matches!(
            backend.read_at(3, 10),
            Err(StorageError::ReadPastEnd { size: 5, .. })
        ));
        assert!(backend.read_at(9, 1).is_err());
    }

    #[test]
    fn truncate_cuts_tail() {
        let mut backend = InMemoryBackend::new();
        backend.append(b"listed sold").unwrap();
        backend.truncate(6).unwrap();
        assert_eq!(backend.data(), b"listed");
        assert!(matches!(
            backend.truncate(100),
            Err(StorageError::TruncateBeyondEnd { requested: 100, size: 6 })
        ));
    }

    #[test]
    fn with_data_preloads() {
        let backend = InMemoryBackend::with_data(b"journal".to_vec());
        assert_eq!(backend.size().unwrap(), 7);
        assert!(backend.describe().contains("7 bytes"));
    }
}
