use crate::entity::{AuditInfo, EntityId};
use serde::{Deserialize, Serialize};

/// An image attached to a property.
///
/// Images are removed physically rather than soft deleted. Among the
/// enabled images of one property at most one is primary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyImage {
    /// Identity and timestamps.
    pub audit: AuditInfo,
    /// Owning property.
    pub property_id: EntityId,
    /// Path or URL of the image file.
    pub file: String,
    /// Hidden from listings when false.
    pub enabled: bool,
    /// Caption.
    pub title: Option<String>,
    /// Longer description.
    pub description: Option<String>,
    /// Position in the gallery, starting at 1.
    pub display_order: u32,
    /// Cover image flag.
    pub is_primary: bool,
    /// Lower-case file extension.
    pub file_type: Option<String>,
    /// Size in bytes, when known.
    pub file_size_bytes: Option<u64>,
    /// Derived thumbnail location.
    pub thumbnail_path: Option<String>,
}

impl PropertyImage {
    /// Entity id.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.audit.id
    }

    /// Whether this image currently serves as the cover.
    #[must_use]
    pub fn is_effective_primary(&self) -> bool {
        self.is_primary && self.enabled
    }
}
