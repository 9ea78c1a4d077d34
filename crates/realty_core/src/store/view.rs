use crate::entity::EntityId;
use crate::store::{StoredEntity, Tables};
use crate::types::{EntityKind, SequenceNumber};
use parking_lot::RwLockReadGuard;

/// Read access to entities, committed or staged.
///
/// Lookups return every row regardless of its `active` flag; the repository
/// traits layered on top decide what counts as visible.
pub trait EntityView {
    /// Entity by id.
    fn get<T: StoredEntity>(&self, id: EntityId) -> Option<T>;

    /// All entities of a kind matching `predicate`, in no particular order.
    fn find<T, P>(&self, predicate: P) -> Vec<T>
    where
        T: StoredEntity,
        P: Fn(&T) -> bool;

    /// All entities of a kind.
    fn scan<T: StoredEntity>(&self) -> Vec<T> {
        self.find(|_: &T| true)
    }
}

/// A consistent view of committed state.
///
/// Holds a shared lock on the tables; commits wait until every snapshot
/// is dropped, so do not start a write while holding one.
pub struct Snapshot<'a> {
    tables: RwLockReadGuard<'a, Tables>,
    sequence: SequenceNumber,
}

impl<'a> Snapshot<'a> {
    pub(crate) fn new(tables: RwLockReadGuard<'a, Tables>, sequence: SequenceNumber) -> Self {
        Self { tables, sequence }
    }

    /// Commit sequence this snapshot reflects.
    #[must_use]
    pub fn sequence(&self) -> SequenceNumber {
        self.sequence
    }

    /// Rows per table, active or not.
    #[must_use]
    pub fn count(&self, kind: EntityKind) -> usize {
        self.tables.count(kind)
    }
}

impl EntityView for Snapshot<'_> {
    fn get<T: StoredEntity>(&self, id: EntityId) -> Option<T> {
        T::table(&self.tables).get(&id).cloned()
    }

    fn find<T, P>(&self, predicate: P) -> Vec<T>
    where
        T: StoredEntity,
        P: Fn(&T) -> bool,
    {
        T::table(&self.tables)
            .values()
            .filter(|entity| predicate(entity))
            .cloned()
            .collect()
    }
}

impl std::fmt::Debug for Snapshot<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}
