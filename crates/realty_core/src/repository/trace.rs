use crate::entity::EntityId;
use crate::model::PropertyTrace;
use crate::store::EntityView;
use chrono::{DateTime, Utc};

/// Trace queries. Histories are returned newest first.
pub trait TraceRepository: EntityView {
    /// History of a property.
    fn traces_of(&self, property_id: EntityId) -> Vec<PropertyTrace> {
        let mut found = self.find(|t: &PropertyTrace| t.property_id == property_id);
        found.sort_by(|a, b| {
            b.event_date
                .cmp(&a.event_date)
                .then(b.audit.created_at.cmp(&a.audit.created_at))
                .then(b.id().cmp(&a.id()))
        });
        found
    }

    /// Most recent trace of a property.
    fn last_trace_of(&self, property_id: EntityId) -> Option<PropertyTrace> {
        self.traces_of(property_id).into_iter().next()
    }

    /// Traces with `from <= event_date <= to`.
    fn traces_between(
        &self,
        property_id: EntityId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<PropertyTrace> {
        self.traces_of(property_id)
            .into_iter()
            .filter(|t| t.event_date >= from && t.event_date <= to)
            .collect()
    }
}

impl<V: EntityView> TraceRepository for V {}
