use crate::entity::{AuditInfo, EntityId};
use crate::model::{ListingType, PropertyCondition, PropertyStatus, PropertyType};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A listed property.
///
/// `code_internal` is unique among active properties and never changes
/// after creation. Images and traces point back here by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Identity, timestamps and soft-delete flag.
    pub audit: AuditInfo,
    /// Listing headline.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Asking price.
    pub price: Decimal,
    /// Agency-assigned listing code.
    pub code_internal: String,
    /// Year built.
    pub year: i32,
    /// Free-form description.
    pub description: Option<String>,
    /// Kind of building.
    pub property_type: PropertyType,
    /// Market status.
    pub status: PropertyStatus,
    /// Sale, rent or both.
    pub listing_type: ListingType,
    /// Physical condition.
    pub condition: PropertyCondition,
    /// Bedroom count.
    pub bedrooms: Option<u32>,
    /// Full bathroom count.
    pub bathrooms: Option<u32>,
    /// Half bathroom count.
    pub half_bathrooms: Option<u32>,
    /// Parking spaces.
    pub parking_spaces: Option<u32>,
    /// Interior area in square feet.
    pub square_feet: Option<Decimal>,
    /// Lot area.
    pub lot_size: Option<Decimal>,
    /// City.
    pub city: Option<String>,
    /// State or province.
    pub state: Option<String>,
    /// Postal code.
    pub zip_code: Option<String>,
    /// Neighborhood.
    pub neighborhood: Option<String>,
    /// Latitude in degrees.
    pub latitude: Option<Decimal>,
    /// Longitude in degrees.
    pub longitude: Option<Decimal>,
    /// Pool on site.
    pub has_pool: bool,
    /// Garden on site.
    pub has_garden: bool,
    /// Garage on site.
    pub has_garage: bool,
    /// Fireplace.
    pub has_fireplace: bool,
    /// Air conditioning.
    pub has_air_conditioning: bool,
    /// Heating.
    pub has_heating: bool,
    /// Offered furnished.
    pub is_furnished: bool,
    /// Pets allowed.
    pub pets_allowed: bool,
    /// Monthly rent when offered for rent.
    pub monthly_rent: Option<Decimal>,
    /// Annual property tax.
    pub property_tax: Option<Decimal>,
    /// Homeowners association fees.
    pub hoa_fees: Option<Decimal>,
    /// Date the property becomes available.
    pub available_from: Option<DateTime<Utc>>,
    /// When the listing was created.
    pub listed_date: Option<DateTime<Utc>>,
    /// When the property sold.
    pub sold_date: Option<DateTime<Utc>>,
    /// Owning owner.
    pub owner_id: EntityId,
}

impl Property {
    /// Entity id.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.audit.id
    }

    /// Whether the property has not been soft deleted.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.audit.active
    }

    /// Whether the property is active and on the market.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.is_active() && self.status == PropertyStatus::Available
    }
}
