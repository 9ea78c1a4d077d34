//! Journal writer and recovery.

use crate::error::CoreResult;
use crate::journal::reader::JournalReader;
use crate::journal::record::JournalRecord;
use crate::store::Tables;
use crate::types::{SequenceNumber, TransactionId};
use parking_lot::Mutex;
use realty_storage::{StorageBackend, StorageResult};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Summary of the journal contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalStats {
    /// Bytes on the backend.
    pub size_bytes: u64,
    /// Complete records.
    pub records: u64,
    /// Batches that reached their commit record.
    pub committed_transactions: u64,
    /// Batches without a commit record.
    pub incomplete_transactions: u64,
    /// Highest commit sequence seen.
    pub last_sequence: u64,
}

/// State rebuilt from the journal on open.
#[derive(Debug, Default)]
pub struct Recovery {
    /// Committed entity tables.
    pub tables: Tables,
    /// Highest transaction id seen, committed or not.
    pub last_txid: TransactionId,
    /// Highest committed sequence.
    pub last_sequence: SequenceNumber,
    /// Batches applied.
    pub committed: u64,
    /// Batches ignored for lack of a commit record.
    pub discarded: u64,
}

/// Append-only journal over a storage backend.
pub struct Journal {
    backend: Mutex<Box<dyn StorageBackend>>,
    sync_on_commit: bool,
}

impl Journal {
    /// Wraps a backend.
    pub fn new(backend: Box<dyn StorageBackend>, sync_on_commit: bool) -> Self {
        Self {
            backend: Mutex::new(backend),
            sync_on_commit,
        }
    }

    /// Appends a transaction batch as one contiguous write and flushes it.
    ///
    /// On failure the backend is cut back to its previous size so that a
    /// partially written batch cannot precede later commits.
    pub fn append_batch(&self, records: &[JournalRecord]) -> CoreResult<u64> {
        let mut data = Vec::new();
        for record in records {
            record.encode_into(&mut data)?;
        }

        let mut backend = self.backend.lock();
        let start = backend.size()?;
        match write_through(backend.as_mut(), &data, self.sync_on_commit) {
            Ok(offset) => Ok(offset),
            Err(err) => {
                if let Err(cleanup) = backend.truncate(start) {
                    warn!(error = %cleanup, offset = start, "failed to cut back partial journal batch");
                }
                Err(err.into())
            }
        }
    }

    /// Rebuilds committed state, cutting off any torn tail.
    pub fn replay(&self) -> CoreResult<Recovery> {
        let mut backend = self.backend.lock();
        let mut recovery = Recovery::default();
        let mut open: BTreeMap<TransactionId, Vec<JournalRecord>> = BTreeMap::new();

        let (valid_end, total) = {
            let mut reader = JournalReader::new(backend.as_ref())?;
            for item in reader.by_ref() {
                let (_, record) = item?;
                let txid = record.txid();
                recovery.last_txid = recovery.last_txid.max(txid);
                match record {
                    JournalRecord::Begin { .. } => {
                        open.insert(txid, Vec::new());
                    }
                    JournalRecord::Commit { sequence, .. } => {
                        for write in open.remove(&txid).unwrap_or_default() {
                            match write {
                                JournalRecord::Put { record, .. } => recovery.tables.put(record),
                                JournalRecord::Delete { kind, id, .. } => {
                                    recovery.tables.remove(kind, id);
                                }
                                _ => {}
                            }
                        }
                        recovery.last_sequence = recovery.last_sequence.max(sequence);
                        recovery.committed += 1;
                    }
                    write => open.entry(txid).or_default().push(write),
                }
            }
            (reader.valid_end(), reader.total_size())
        };

        recovery.discarded = open.len() as u64;
        if valid_end < total {
            debug!(valid_end, total, "cutting torn journal tail");
            backend.truncate(valid_end)?;
        }
        debug!(
            committed = recovery.committed,
            discarded = recovery.discarded,
            last_sequence = recovery.last_sequence.as_u64(),
            "journal replayed"
        );
        Ok(recovery)
    }

    /// Scans the journal and summarises it.
    pub fn stats(&self) -> CoreResult<JournalStats> {
        let backend = self.backend.lock();
        let mut stats = JournalStats {
            size_bytes: backend.size()?,
            ..JournalStats::default()
        };
        let mut open = 0u64;
        for item in JournalReader::new(backend.as_ref())? {
            let (_, record) = item?;
            stats.records += 1;
            match record {
                JournalRecord::Begin { .. } => open += 1,
                JournalRecord::Commit { sequence, .. } => {
                    open = open.saturating_sub(1);
                    stats.committed_transactions += 1;
                    stats.last_sequence = stats.last_sequence.max(sequence.as_u64());
                }
                _ => {}
            }
        }
        stats.incomplete_transactions = open;
        Ok(stats)
    }

    /// Current size in bytes.
    pub fn size(&self) -> CoreResult<u64> {
        Ok(self.backend.lock().size()?)
    }

    /// Describes the backend, for diagnostics.
    pub fn describe(&self) -> String {
        self.backend.lock().describe()
    }
}

fn write_through(backend: &mut dyn StorageBackend, data: &[u8], sync: bool) -> StorageResult<u64> {
    let offset = backend.append(data)?;
    backend.flush()?;
    if sync {
        backend.sync()?;
    }
    Ok(offset)
}

impl std::fmt::Debug for Journal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Journal")
            .field("backend", &self.describe())
            .field("sync_on_commit", &self.sync_on_commit)
            .finish()
    }
}
