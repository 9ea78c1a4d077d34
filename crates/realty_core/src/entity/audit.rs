use crate::entity::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity, timestamps and soft-delete flag embedded in every entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditInfo {
    /// Entity id.
    pub id: EntityId,
    /// Set once, when the entity is first staged.
    pub created_at: DateTime<Utc>,
    /// Set on every mutation after creation.
    pub updated_at: Option<DateTime<Utc>>,
    /// False once soft deleted.
    pub active: bool,
}

impl AuditInfo {
    /// Fresh audit info with a new id, stamped now.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(EntityId::new())
    }

    /// Fresh audit info for a caller-chosen id.
    #[must_use]
    pub fn with_id(id: EntityId) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            updated_at: None,
            active: true,
        }
    }

    /// Records a mutation.
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }

    /// Soft deletes the entity.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.touch();
    }
}

impl Default for AuditInfo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_active_and_untouched() {
        let audit = AuditInfo::new();
        assert!(audit.active);
        assert!(audit.updated_at.is_none());
    }

    #[test]
    fn deactivate_stamps_update() {
        let mut audit = AuditInfo::new();
        audit.deactivate();
        assert!(!audit.active);
        assert!(audit.updated_at.unwrap() >= audit.created_at);
    }
}
