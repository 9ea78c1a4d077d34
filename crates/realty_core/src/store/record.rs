use crate::entity::{AuditInfo, EntityId};
use crate::model::{Owner, Property, PropertyImage, PropertyTrace};
use crate::store::Tables;
use crate::types::EntityKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Any stored entity, as written to the journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Record {
    /// An owner.
    Owner(Owner),
    /// A property.
    Property(Property),
    /// A property image.
    Image(PropertyImage),
    /// A property trace.
    Trace(PropertyTrace),
}

impl Record {
    /// Table the record belongs to.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Owner(_) => EntityKind::Owner,
            Self::Property(_) => EntityKind::Property,
            Self::Image(_) => EntityKind::Image,
            Self::Trace(_) => EntityKind::Trace,
        }
    }

    /// Id of the wrapped entity.
    #[must_use]
    pub fn id(&self) -> EntityId {
        match self {
            Self::Owner(e) => e.id(),
            Self::Property(e) => e.id(),
            Self::Image(e) => e.id(),
            Self::Trace(e) => e.id(),
        }
    }
}

/// An entity type the store keeps in its own table.
pub trait StoredEntity: Clone + Send + Sync + 'static {
    /// Table this type lives in.
    const KIND: EntityKind;

    /// When true, an id may be written once and never deleted.
    const APPEND_ONLY: bool = false;

    /// Embedded audit info.
    fn audit(&self) -> &AuditInfo;

    /// Wraps the entity for the journal.
    fn into_record(self) -> Record;

    /// Borrows the entity out of a record of the matching kind.
    fn from_record(record: &Record) -> Option<&Self>;

    /// The committed table for this type.
    fn table(tables: &Tables) -> &BTreeMap<EntityId, Self>;

    /// Entity id.
    fn entity_id(&self) -> EntityId {
        self.audit().id
    }
}

macro_rules! stored_entity {
    ($ty:ty, $kind:ident, $field:ident $(, $append_only:expr)?) => {
        impl StoredEntity for $ty {
            const KIND: EntityKind = EntityKind::$kind;
            $(const APPEND_ONLY: bool = $append_only;)?

            fn audit(&self) -> &AuditInfo {
                &self.audit
            }

            fn into_record(self) -> Record {
                Record::$kind(self)
            }

            fn from_record(record: &Record) -> Option<&Self> {
                match record {
                    Record::$kind(entity) => Some(entity),
                    _ => None,
                }
            }

            fn table(tables: &Tables) -> &BTreeMap<EntityId, Self> {
                &tables.$field
            }
        }
    };
}

stored_entity!(Owner, Owner, owners);
stored_entity!(Property, Property, properties);
stored_entity!(PropertyImage, Image, images);
stored_entity!(PropertyTrace, Trace, traces, true);
