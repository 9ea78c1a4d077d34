//! Sequential journal reader.

use crate::error::{CoreError, CoreResult};
use crate::journal::record::{
    compute_crc32, JournalRecord, RecordType, CRC_SIZE, HEADER_SIZE, JOURNAL_MAGIC,
    JOURNAL_VERSION,
};
use realty_storage::StorageBackend;

/// Iterates the records of a journal one frame at a time.
///
/// - An incomplete trailing frame ends iteration; [`valid_end`](Self::valid_end)
///   then points at its first byte.
/// - Bad magic, an unsupported version, an unknown type, or a checksum
///   mismatch yield an error and stop iteration.
pub struct JournalReader<'a> {
    backend: &'a dyn StorageBackend,
    total_size: u64,
    offset: u64,
    finished: bool,
}

impl<'a> JournalReader<'a> {
    /// Starts reading at offset 0.
    pub fn new(backend: &'a dyn StorageBackend) -> CoreResult<Self> {
        Ok(Self {
            total_size: backend.size()?,
            backend,
            offset: 0,
            finished: false,
        })
    }

    /// Offset just past the last complete record read so far.
    #[must_use]
    pub fn valid_end(&self) -> u64 {
        self.offset
    }

    /// Total size of the journal when the reader was created.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    fn read_next(&mut self) -> CoreResult<Option<(u64, JournalRecord)>> {
        let remaining = self.total_size - self.offset;
        if remaining < HEADER_SIZE as u64 {
            return Ok(None);
        }

        let header = self.backend.read_at(self.offset, HEADER_SIZE)?;
        if header[..4] != JOURNAL_MAGIC {
            return Err(CoreError::journal_corruption(format!(
                "bad magic at offset {}",
                self.offset
            )));
        }

        let version = u16::from_le_bytes([header[4], header[5]]);
        if version != JOURNAL_VERSION {
            return Err(CoreError::journal_corruption(format!(
                "unsupported journal version {version} at offset {}",
                self.offset
            )));
        }

        let record_type = RecordType::from_byte(header[6]).ok_or_else(|| {
            CoreError::journal_corruption(format!(
                "unknown record type {} at offset {}",
                header[6], self.offset
            ))
        })?;

        let len = u32::from_le_bytes([header[7], header[8], header[9], header[10]]) as usize;
        let frame_len = (HEADER_SIZE + len + CRC_SIZE) as u64;
        if remaining < frame_len {
            return Ok(None);
        }

        let body = self
            .backend
            .read_at(self.offset + HEADER_SIZE as u64, len + CRC_SIZE)?;
        let (payload, crc_bytes) = body.split_at(len);
        let expected = u32::from_le_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);

        let mut covered = header;
        covered.extend_from_slice(payload);
        let actual = compute_crc32(&covered);
        if expected != actual {
            return Err(CoreError::ChecksumMismatch { expected, actual });
        }

        let record = JournalRecord::decode_payload(record_type, payload)?;
        let start = self.offset;
        self.offset += frame_len;
        Ok(Some((start, record)))
    }
}

impl Iterator for JournalReader<'_> {
    type Item = CoreResult<(u64, JournalRecord)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_next() {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SequenceNumber, TransactionId};
    use realty_storage::InMemoryBackend;

    fn frames(records: &[JournalRecord]) -> Vec<u8> {
        let mut out = Vec::new();
        for record in records {
            record.encode_into(&mut out).unwrap();
        }
        out
    }

    fn sample() -> Vec<JournalRecord> {
        let txid = TransactionId::new(1);
        vec![
            JournalRecord::Begin { txid },
            JournalRecord::Commit {
                txid,
                sequence: SequenceNumber::new(1),
            },
        ]
    }

    #[test]
    fn reads_every_record() {
        let backend = InMemoryBackend::with_data(frames(&sample()));
        let records: Vec<_> = JournalReader::new(&backend)
            .unwrap()
            .map(|r| r.unwrap().1)
            .collect();
        assert_eq!(records, sample());
    }

    #[test]
    fn truncated_tail_ends_iteration() {
        let mut data = frames(&sample());
        let full = data.len() as u64;
        data.truncate(data.len() - 3);

        let backend = InMemoryBackend::with_data(data);
        let mut reader = JournalReader::new(&backend).unwrap();
        assert!(reader.next().unwrap().is_ok());
        assert!(reader.next().is_none());
        assert!(reader.valid_end() < full);
        assert!(reader.valid_end() > 0);
    }

    #[test]
    fn short_header_is_end_of_log() {
        let mut data = frames(&sample());
        data.extend_from_slice(b"RLT");
        let backend = InMemoryBackend::with_data(data);
        assert_eq!(JournalReader::new(&backend).unwrap().count(), 2);
    }

    #[test]
    fn flipped_payload_byte_fails_checksum() {
        let mut data = frames(&sample());
        data[HEADER_SIZE + 1] ^= 0xFF;
        let backend = InMemoryBackend::with_data(data);
        let first = JournalReader::new(&backend).unwrap().next().unwrap();
        assert!(matches!(first, Err(CoreError::ChecksumMismatch { .. })));
    }

    #[test]
    fn bad_magic_is_fatal() {
        let mut data = frames(&sample());
        data[0] = b'X';
        let backend = InMemoryBackend::with_data(data);
        let first = JournalReader::new(&backend).unwrap().next().unwrap();
        assert!(matches!(first, Err(CoreError::JournalCorruption { .. })));
    }

    #[test]
    fn unknown_type_is_fatal() {
        let mut data = frames(&sample());
        data[6] = 42;
        let backend = InMemoryBackend::with_data(data);
        let first = JournalReader::new(&backend).unwrap().next().unwrap();
        assert!(matches!(first, Err(CoreError::JournalCorruption { .. })));
    }
}
