use crate::entity::EntityId;
use crate::model::{Owner, Property, PropertyImage, PropertyTrace};
use crate::store::Record;
use crate::types::EntityKind;
use std::collections::BTreeMap;

/// Committed entities, one ordered map per kind.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub(crate) owners: BTreeMap<EntityId, Owner>,
    pub(crate) properties: BTreeMap<EntityId, Property>,
    pub(crate) images: BTreeMap<EntityId, PropertyImage>,
    pub(crate) traces: BTreeMap<EntityId, PropertyTrace>,
}

impl Tables {
    /// Inserts or replaces an entity.
    pub fn put(&mut self, record: Record) {
        match record {
            Record::Owner(e) => {
                self.owners.insert(e.id(), e);
            }
            Record::Property(e) => {
                self.properties.insert(e.id(), e);
            }
            Record::Image(e) => {
                self.images.insert(e.id(), e);
            }
            Record::Trace(e) => {
                self.traces.insert(e.id(), e);
            }
        }
    }

    /// Removes an entity, returning whether it existed.
    pub fn remove(&mut self, kind: EntityKind, id: EntityId) -> bool {
        match kind {
            EntityKind::Owner => self.owners.remove(&id).is_some(),
            EntityKind::Property => self.properties.remove(&id).is_some(),
            EntityKind::Image => self.images.remove(&id).is_some(),
            EntityKind::Trace => self.traces.remove(&id).is_some(),
        }
    }

    /// Whether an entity with this id is present.
    #[must_use]
    pub fn contains(&self, kind: EntityKind, id: EntityId) -> bool {
        match kind {
            EntityKind::Owner => self.owners.contains_key(&id),
            EntityKind::Property => self.properties.contains_key(&id),
            EntityKind::Image => self.images.contains_key(&id),
            EntityKind::Trace => self.traces.contains_key(&id),
        }
    }

    /// Rows in a table, active or not.
    #[must_use]
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Owner => self.owners.len(),
            EntityKind::Property => self.properties.len(),
            EntityKind::Image => self.images.len(),
            EntityKind::Trace => self.traces.len(),
        }
    }
}
