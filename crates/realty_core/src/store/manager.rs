//! Transaction manager.

use crate::error::{CoreError, CoreResult};
use crate::journal::{Journal, JournalRecord, JournalStats};
use crate::store::{PendingWrite, Snapshot, Tables, Transaction, WriteTransaction};
use crate::types::{SequenceNumber, TransactionId};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Owns the journal and the committed tables.
///
/// - one writer at a time, via `write_lock`
/// - the journal batch is durable before anything is published
/// - publication swaps all writes of a commit in under one table lock
pub struct TransactionManager {
    journal: Journal,
    tables: RwLock<Tables>,
    write_lock: Mutex<()>,
    next_txid: AtomicU64,
    committed_seq: AtomicU64,
}

impl TransactionManager {
    /// Replays the journal and returns a manager over the recovered state.
    pub fn open(journal: Journal) -> CoreResult<Self> {
        let recovery = journal.replay()?;
        Ok(Self {
            journal,
            tables: RwLock::new(recovery.tables),
            write_lock: Mutex::new(()),
            next_txid: AtomicU64::new(recovery.last_txid.as_u64() + 1),
            committed_seq: AtomicU64::new(recovery.last_sequence.as_u64()),
        })
    }

    /// Acquires the writer lock, blocking while another writer is active.
    pub fn begin_write(&self) -> WriteTransaction<'_> {
        let guard = self.write_lock.lock();
        let txid = TransactionId::new(self.next_txid.fetch_add(1, Ordering::SeqCst));
        WriteTransaction::new(
            Transaction::new(txid, self.committed_seq()),
            &self.tables,
            guard,
        )
    }

    /// Journals and publishes the staged writes.
    ///
    /// A transaction that staged nothing commits without touching the
    /// journal. On a journal failure the transaction is aborted and nothing
    /// becomes visible.
    pub fn commit_write(&self, wtx: &mut WriteTransaction<'_>) -> CoreResult<SequenceNumber> {
        let txn = wtx.inner_mut();
        if !txn.is_active() {
            return Err(CoreError::invalid_operation("transaction not active"));
        }
        if txn.write_count() == 0 {
            txn.mark_committed();
            return Ok(self.committed_seq());
        }

        let txid = txn.id();
        let sequence = self.committed_seq().next();

        let mut records = Vec::with_capacity(txn.write_count() + 2);
        records.push(JournalRecord::Begin { txid });
        for ((kind, id), write) in txn.pending_writes() {
            records.push(match write {
                PendingWrite::Put(record) => JournalRecord::Put {
                    txid,
                    record: record.clone(),
                },
                PendingWrite::Delete => JournalRecord::Delete {
                    txid,
                    kind: *kind,
                    id: *id,
                },
            });
        }
        records.push(JournalRecord::Commit { txid, sequence });

        if let Err(err) = self.journal.append_batch(&records) {
            warn!(%txid, error = %err, "commit failed, transaction aborted");
            txn.mark_aborted();
            return Err(err);
        }

        let writes = txn.take_writes();
        let count = writes.len();
        {
            let mut tables = self.tables.write();
            for ((kind, id), write) in writes {
                match write {
                    PendingWrite::Put(record) => tables.put(record),
                    PendingWrite::Delete => {
                        tables.remove(kind, id);
                    }
                }
            }
            self.committed_seq.store(sequence.as_u64(), Ordering::SeqCst);
        }
        txn.mark_committed();
        debug!(%txid, %sequence, writes = count, "transaction committed");
        Ok(sequence)
    }

    /// Discards the staged writes.
    pub fn abort_write(&self, wtx: &mut WriteTransaction<'_>) {
        let txn = wtx.inner_mut();
        if txn.is_active() {
            debug!(txid = %txn.id(), discarded = txn.write_count(), "transaction aborted");
            txn.mark_aborted();
        }
    }

    /// Runs `f` as one unit of work: `Ok` commits, `Err` aborts.
    pub fn write<F, T>(&self, f: F) -> CoreResult<T>
    where
        F: FnOnce(&mut WriteTransaction<'_>) -> CoreResult<T>,
    {
        let mut wtx = self.begin_write();
        match f(&mut wtx) {
            Ok(value) => {
                self.commit_write(&mut wtx)?;
                Ok(value)
            }
            Err(err) => {
                self.abort_write(&mut wtx);
                Err(err)
            }
        }
    }

    /// Shared view of committed state.
    pub fn snapshot(&self) -> Snapshot<'_> {
        let tables = self.tables.read();
        Snapshot::new(tables, self.committed_seq())
    }

    /// Sequence of the last published commit.
    #[must_use]
    pub fn committed_seq(&self) -> SequenceNumber {
        SequenceNumber::new(self.committed_seq.load(Ordering::SeqCst))
    }

    /// Journal summary.
    pub fn journal_stats(&self) -> CoreResult<JournalStats> {
        self.journal.stats()
    }

    /// Backend description.
    pub fn describe(&self) -> String {
        self.journal.describe()
    }
}

impl std::fmt::Debug for TransactionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionManager")
            .field("journal", &self.journal)
            .field("committed_seq", &self.committed_seq())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{AuditInfo, EntityId};
    use crate::model::{Owner, PropertyTrace, TransactionKind};
    use crate::store::{EntityView, TransactionState};
    use realty_storage::InMemoryBackend;
    use rust_decimal::Decimal;

    fn manager() -> TransactionManager {
        TransactionManager::open(Journal::new(Box::new(InMemoryBackend::new()), false)).unwrap()
    }

    fn owner(name: &str) -> Owner {
        Owner {
            audit: AuditInfo::new(),
            name: name.into(),
            address: "1 Main St".into(),
            photo: None,
            birthday: None,
            phone: None,
            email: None,
            document_type: None,
            document_number: None,
            city: None,
            state: None,
            zip_code: None,
            country: None,
        }
    }

    #[test]
    fn staged_writes_are_invisible_until_commit() {
        let tm = manager();
        let o = owner("a");
        let mut wtx = tm.begin_write();
        wtx.put(o.clone()).unwrap();
        assert!(wtx.get::<Owner>(o.id()).is_some());
        tm.commit_write(&mut wtx).unwrap();
        drop(wtx);

        assert_eq!(tm.snapshot().get::<Owner>(o.id()), Some(o));
        assert_eq!(tm.committed_seq(), SequenceNumber::new(1));
    }

    #[test]
    fn err_from_unit_of_work_aborts() {
        let tm = manager();
        let o = owner("a");
        let result: CoreResult<()> = tm.write(|tx| {
            tx.put(o.clone())?;
            Err(CoreError::business_rule("nope"))
        });
        assert!(result.is_err());
        assert!(tm.snapshot().get::<Owner>(o.id()).is_none());
        assert_eq!(tm.committed_seq(), SequenceNumber::new(0));
    }

    #[test]
    fn empty_commit_skips_journal() {
        let tm = manager();
        tm.write(|_| Ok(())).unwrap();
        assert_eq!(tm.journal_stats().unwrap().records, 0);
    }

    #[test]
    fn commit_twice_is_invalid() {
        let tm = manager();
        let mut wtx = tm.begin_write();
        wtx.put(owner("a")).unwrap();
        tm.commit_write(&mut wtx).unwrap();
        assert_eq!(wtx.inner().state(), TransactionState::Committed);
        assert!(tm.commit_write(&mut wtx).is_err());
    }

    #[test]
    fn traces_reject_rewrite_and_delete() {
        let tm = manager();
        let trace = PropertyTrace::record(
            EntityId::new(),
            "Property Listed",
            TransactionKind::Listing,
            Decimal::ONE,
            Decimal::ZERO,
            "Initial property listing",
        );
        tm.write(|tx| tx.put(trace.clone())).unwrap();

        let rewrite = tm.write(|tx| {
            let mut changed = trace.clone();
            changed.value = Decimal::TEN;
            tx.put(changed)
        });
        assert!(matches!(rewrite, Err(CoreError::InvalidOperation { .. })));

        let delete = tm.write(|tx| tx.delete::<PropertyTrace>(trace.id()));
        assert!(matches!(delete, Err(CoreError::InvalidOperation { .. })));
        assert_eq!(tm.snapshot().get::<PropertyTrace>(trace.id()), Some(trace));
    }

    #[test]
    fn scan_overlays_staged_writes() {
        let tm = manager();
        let keep = owner("keep");
        let drop_me = owner("drop");
        tm.write(|tx| {
            tx.put(keep.clone())?;
            tx.put(drop_me.clone())
        })
        .unwrap();

        tm.write(|tx| {
            tx.delete::<Owner>(drop_me.id())?;
            tx.put(owner("new"))?;
            let mut names: Vec<String> = tx.scan::<Owner>().into_iter().map(|o| o.name).collect();
            names.sort();
            assert_eq!(names, vec!["keep", "new"]);
            Ok(())
        })
        .unwrap();
    }
}
