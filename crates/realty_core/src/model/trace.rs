use crate::entity::{AuditInfo, EntityId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a recorded property event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Property first listed.
    Listing,
    /// Headline fields changed.
    Update,
    /// Asking price changed.
    PriceChange,
}

impl TransactionKind {
    /// Label stored on the trace.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Listing => "Listing",
            Self::Update => "Update",
            Self::PriceChange => "Price Change",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable entry in a property's history.
///
/// Traces are append-only: the store refuses to overwrite or delete them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyTrace {
    /// Identity and timestamps.
    pub audit: AuditInfo,
    /// Property the event belongs to.
    pub property_id: EntityId,
    /// When the event happened.
    pub event_date: DateTime<Utc>,
    /// Event label, e.g. "Price Change".
    pub name: String,
    /// Monetary value at the event, usually the price.
    pub value: Decimal,
    /// Tax at the event.
    pub tax: Decimal,
    /// Human readable summary.
    pub description: Option<String>,
    /// Event category label.
    pub transaction_type: Option<String>,
    /// Listing agent.
    pub agent_name: Option<String>,
    /// Buyer.
    pub buyer_name: Option<String>,
    /// Seller.
    pub seller_name: Option<String>,
    /// Commission percentage.
    pub commission_rate: Option<Decimal>,
    /// Commission paid.
    pub commission_amount: Option<Decimal>,
}

impl PropertyTrace {
    /// Builds a new trace stamped now.
    #[must_use]
    pub fn record(
        property_id: EntityId,
        name: impl Into<String>,
        kind: TransactionKind,
        value: Decimal,
        tax: Decimal,
        description: impl Into<String>,
    ) -> Self {
        let audit = AuditInfo::new();
        Self {
            event_date: audit.created_at,
            audit,
            property_id,
            name: name.into(),
            value,
            tax,
            description: Some(description.into()),
            transaction_type: Some(kind.as_str().to_string()),
            agent_name: None,
            buyer_name: None,
            seller_name: None,
            commission_rate: None,
            commission_amount: None,
        }
    }

    /// Entity id.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.audit.id
    }
}
