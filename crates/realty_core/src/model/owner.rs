use crate::entity::{AuditInfo, EntityId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A property owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    /// Identity, timestamps and soft-delete flag.
    pub audit: AuditInfo,
    /// Full name.
    pub name: String,
    /// Postal address.
    pub address: String,
    /// Photo location.
    pub photo: Option<String>,
    /// Date of birth.
    pub birthday: Option<NaiveDate>,
    /// Phone number.
    pub phone: Option<String>,
    /// Email, unique among active owners ignoring case.
    pub email: Option<String>,
    /// Identity document type, e.g. "Passport".
    pub document_type: Option<String>,
    /// Identity document number.
    pub document_number: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or province.
    pub state: Option<String>,
    /// Postal code.
    pub zip_code: Option<String>,
    /// Country.
    pub country: Option<String>,
}

impl Owner {
    /// Entity id.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.audit.id
    }

    /// Whether the owner has not been soft deleted.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.audit.active
    }
}
