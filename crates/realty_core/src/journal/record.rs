//! Journal record types and framing.

use crate::error::{CoreError, CoreResult};
use crate::store::Record;
use crate::types::{EntityKind, SequenceNumber, TransactionId};
use crate::entity::EntityId;
use serde::{Deserialize, Serialize};

/// Magic bytes opening every journal record.
pub const JOURNAL_MAGIC: [u8; 4] = *b"RLTJ";

/// Current journal format version.
pub const JOURNAL_VERSION: u16 = 1;

/// magic (4) + version (2) + type (1) + length (4)
pub const HEADER_SIZE: usize = 11;

/// Trailing checksum size.
pub const CRC_SIZE: usize = 4;

/// Record type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RecordType {
    /// Opens a batch.
    Begin = 1,
    /// Stores an entity.
    Put = 2,
    /// Removes an entity.
    Delete = 3,
    /// Closes a batch and publishes it.
    Commit = 4,
}

impl RecordType {
    /// Converts a byte to a record type.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            1 => Some(Self::Begin),
            2 => Some(Self::Put),
            3 => Some(Self::Delete),
            4 => Some(Self::Commit),
            _ => None,
        }
    }

    /// Converts the record type to a byte.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }
}

/// One journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JournalRecord {
    /// Start of a transaction batch.
    Begin {
        /// Transaction ID.
        txid: TransactionId,
    },
    /// Full image of an inserted or updated entity.
    Put {
        /// Transaction ID.
        txid: TransactionId,
        /// The entity after the write.
        record: Record,
    },
    /// Physical removal of an entity.
    Delete {
        /// Transaction ID.
        txid: TransactionId,
        /// Table the entity lived in.
        kind: EntityKind,
        /// Removed entity.
        id: EntityId,
    },
    /// End of a transaction batch.
    Commit {
        /// Transaction ID.
        txid: TransactionId,
        /// Sequence number assigned to the commit.
        sequence: SequenceNumber,
    },
}

impl JournalRecord {
    /// Returns the record type.
    #[must_use]
    pub fn record_type(&self) -> RecordType {
        match self {
            Self::Begin { .. } => RecordType::Begin,
            Self::Put { .. } => RecordType::Put,
            Self::Delete { .. } => RecordType::Delete,
            Self::Commit { .. } => RecordType::Commit,
        }
    }

    /// Transaction this record belongs to.
    #[must_use]
    pub fn txid(&self) -> TransactionId {
        match self {
            Self::Begin { txid }
            | Self::Put { txid, .. }
            | Self::Delete { txid, .. }
            | Self::Commit { txid, .. } => *txid,
        }
    }

    /// Appends the framed record to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) -> CoreResult<()> {
        let mut payload = Vec::new();
        ciborium::into_writer(self, &mut payload)?;

        let len = u32::try_from(payload.len())
            .map_err(|_| CoreError::invalid_operation("journal record payload too large"))?;

        let start = out.len();
        out.extend_from_slice(&JOURNAL_MAGIC);
        out.extend_from_slice(&JOURNAL_VERSION.to_le_bytes());
        out.push(self.record_type().as_byte());
        out.extend_from_slice(&len.to_le_bytes());
        out.extend_from_slice(&payload);

        let crc = compute_crc32(&out[start..]);
        out.extend_from_slice(&crc.to_le_bytes());
        Ok(())
    }

    /// Encodes the record as a standalone frame.
    pub fn encode(&self) -> CoreResult<Vec<u8>> {
        let mut out = Vec::new();
        self.encode_into(&mut out)?;
        Ok(out)
    }

    /// Decodes a payload whose header announced `record_type`.
    pub fn decode_payload(record_type: RecordType, payload: &[u8]) -> CoreResult<Self> {
        let record: Self = ciborium::from_reader(payload)?;
        if record.record_type() != record_type {
            return Err(CoreError::journal_corruption(format!(
                "header announced {:?} but payload holds {:?}",
                record_type,
                record.record_type()
            )));
        }
        Ok(record)
    }
}

/// CRC32 (IEEE polynomial), table driven.
pub fn compute_crc32(data: &[u8]) -> u32 {
    const CRC32_TABLE: [u32; 256] = {
        let mut table = [0u32; 256];
        let mut i = 0;
        while i < 256 {
            let mut crc = i as u32;
            let mut bit = 0;
            while bit < 8 {
                crc = if crc & 1 != 0 {
                    (crc >> 1) ^ 0xEDB8_8320
                } else {
                    crc >> 1
                };
                bit += 1;
            }
            table[i] = crc;
            i += 1;
        }
        table
    };

    !data.iter().fold(0xFFFF_FFFF_u32, |crc, &byte| {
        (crc >> 8) ^ CRC32_TABLE[((crc ^ u32::from(byte)) & 0xFF) as usize]
    })
}
