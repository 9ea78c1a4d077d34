//! Transaction state.

use crate::entity::EntityId;
use crate::error::{CoreError, CoreResult};
use crate::store::{EntityView, Record, StoredEntity, Tables};
use crate::types::{EntityKind, SequenceNumber, TransactionId};
use parking_lot::{MutexGuard, RwLock};
use std::collections::BTreeMap;

/// State of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    /// Accepting writes.
    Active,
    /// Published.
    Committed,
    /// Discarded.
    Aborted,
}

/// A write staged on a transaction.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingWrite {
    /// Insert or replace with this entity.
    Put(Record),
    /// Physically remove.
    Delete,
}

/// Staged writes of one unit of work.
///
/// Writes are keyed by (kind, id), so a second write to the same entity
/// replaces the first; the journal sees them in key order.
#[derive(Debug)]
pub struct Transaction {
    id: TransactionId,
    snapshot_seq: SequenceNumber,
    state: TransactionState,
    writes: BTreeMap<(EntityKind, EntityId), PendingWrite>,
}

impl Transaction {
    pub(crate) fn new(id: TransactionId, snapshot_seq: SequenceNumber) -> Self {
        Self {
            id,
            snapshot_seq,
            state: TransactionState::Active,
            writes: BTreeMap::new(),
        }
    }

    /// Transaction ID.
    #[must_use]
    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// Sequence of the committed state this transaction started from.
    #[must_use]
    pub fn snapshot_seq(&self) -> SequenceNumber {
        self.snapshot_seq
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// Whether writes are still accepted.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == TransactionState::Active
    }

    /// Stages an insert or replace.
    pub fn put(&mut self, record: Record) -> CoreResult<()> {
        self.ensure_active()?;
        self.writes.insert((record.kind(), record.id()), PendingWrite::Put(record));
        Ok(())
    }

    /// Stages a removal.
    pub fn delete(&mut self, kind: EntityKind, id: EntityId) -> CoreResult<()> {
        self.ensure_active()?;
        self.writes.insert((kind, id), PendingWrite::Delete);
        Ok(())
    }

    /// The staged write for an entity, if any.
    #[must_use]
    pub fn pending(&self, kind: EntityKind, id: EntityId) -> Option<&PendingWrite> {
        self.writes.get(&(kind, id))
    }

    /// All staged writes in key order.
    pub fn pending_writes(&self) -> impl Iterator<Item = (&(EntityKind, EntityId), &PendingWrite)> {
        self.writes.iter()
    }

    /// Number of staged writes.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    pub(crate) fn take_writes(&mut self) -> BTreeMap<(EntityKind, EntityId), PendingWrite> {
        std::mem::take(&mut self.writes)
    }

    pub(crate) fn mark_committed(&mut self) {
        self.state = TransactionState::Committed;
    }

    pub(crate) fn mark_aborted(&mut self) {
        self.state = TransactionState::Aborted;
        self.writes.clear();
    }

    fn ensure_active(&self) -> CoreResult<()> {
        match self.state {
            TransactionState::Active => Ok(()),
            TransactionState::Committed => Err(CoreError::invalid_operation(
                "transaction already committed",
            )),
            TransactionState::Aborted => {
                Err(CoreError::invalid_operation("transaction already aborted"))
            }
        }
    }
}

/// A transaction holding the single-writer lock.
///
/// Reads see committed state overlaid with this transaction's own staged
/// writes. The lock is released when the value is dropped, on every exit
/// path.
pub struct WriteTransaction<'a> {
    txn: Transaction,
    tables: &'a RwLock<Tables>,
    _guard: MutexGuard<'a, ()>,
}

impl<'a> WriteTransaction<'a> {
    pub(crate) fn new(txn: Transaction, tables: &'a RwLock<Tables>, guard: MutexGuard<'a, ()>) -> Self {
        Self {
            txn,
            tables,
            _guard: guard,
        }
    }

    /// Transaction ID.
    #[must_use]
    pub fn id(&self) -> TransactionId {
        self.txn.id()
    }

    /// Number of staged writes.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.txn.write_count()
    }

    /// Stages an insert or replace of `entity`.
    ///
    /// Append-only kinds reject a second write to an existing id.
    pub fn put<T: StoredEntity>(&mut self, entity: T) -> CoreResult<()> {
        if T::APPEND_ONLY && self.get::<T>(entity.entity_id()).is_some() {
            return Err(CoreError::invalid_operation(format!(
                "{} records are append-only",
                T::KIND
            )));
        }
        self.txn.put(entity.into_record())
    }

    /// Stages the physical removal of an entity.
    pub fn delete<T: StoredEntity>(&mut self, id: EntityId) -> CoreResult<()> {
        if T::APPEND_ONLY {
            return Err(CoreError::invalid_operation(format!(
                "{} records cannot be deleted",
                T::KIND
            )));
        }
        self.txn.delete(T::KIND, id)
    }

    pub(crate) fn inner(&self) -> &Transaction {
        &self.txn
    }

    pub(crate) fn inner_mut(&mut self) -> &mut Transaction {
        &mut self.txn
    }
}

impl EntityView for WriteTransaction<'_> {
    fn get<T: StoredEntity>(&self, id: EntityId) -> Option<T> {
        match self.txn.pending(T::KIND, id) {
            Some(PendingWrite::Put(record)) => T::from_record(record).cloned(),
            Some(PendingWrite::Delete) => None,
            None => T::table(&self.tables.read()).get(&id).cloned(),
        }
    }

    fn find<T, P>(&self, predicate: P) -> Vec<T>
    where
        T: StoredEntity,
        P: Fn(&T) -> bool,
    {
        let tables = self.tables.read();
        let mut out: Vec<T> = T::table(&tables)
            .iter()
            .filter(|(id, _)| self.txn.pending(T::KIND, **id).is_none())
            .map(|(_, entity)| entity)
            .filter(|entity| predicate(entity))
            .cloned()
            .collect();

        out.extend(
            self.txn
                .pending_writes()
                .filter(|((kind, _), _)| *kind == T::KIND)
                .filter_map(|(_, write)| match write {
                    PendingWrite::Put(record) => T::from_record(record),
                    PendingWrite::Delete => None,
                })
                .filter(|entity| predicate(entity))
                .cloned(),
        );
        out
    }
}

impl std::fmt::Debug for WriteTransaction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteTransaction")
            .field("txn", &self.txn)
            .finish_non_exhaustive()
    }
}
