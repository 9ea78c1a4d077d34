//! Request types accepted by the services.
//!
//! Update requests use `Option` for every field: `None` leaves the stored
//! value alone, anything else (including `Some(false)` and `Some(0)`) is
//! applied. Blank strings count as `None`.

use crate::entity::EntityId;
use crate::model::{ListingType, PropertyCondition, PropertyStatus, PropertyType};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// New listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateProperty {
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Asking price.
    pub price: Decimal,
    /// Unique listing code.
    pub code_internal: String,
    /// Year built.
    pub year: i32,
    /// Free-text description.
    pub description: Option<String>,
    /// Kind of building or lot.
    pub property_type: PropertyType,
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
    /// State or region.
    pub state: Option<String>,
    /// Postal code, `12345` or `12345-6789`.
    pub zip_code: Option<String>,
    /// Neighborhood.
    pub neighborhood: Option<String>,
    /// Latitude in degrees.
    pub latitude: Option<Decimal>,
    /// Longitude in degrees.
    pub longitude: Option<Decimal>,
    /// Pool flag.
    pub has_pool: bool,
    /// Garden flag.
    pub has_garden: bool,
    /// Garage flag.
    pub has_garage: bool,
    /// Fireplace flag.
    pub has_fireplace: bool,
    /// Air conditioning flag.
    pub has_air_conditioning: bool,
    /// Heating flag.
    pub has_heating: bool,
    /// Furnished flag.
    pub is_furnished: bool,
    /// Pets flag.
    pub pets_allowed: bool,
    /// Monthly rent, for rentals.
    pub monthly_rent: Option<Decimal>,
    /// Yearly property tax.
    pub property_tax: Option<Decimal>,
    /// Homeowners association fees.
    pub hoa_fees: Option<Decimal>,
    /// Date the property can be occupied.
    pub available_from: Option<DateTime<Utc>>,
    /// Owning owner; must be active.
    pub owner_id: EntityId,
}

/// Partial update of a listing. The listing code cannot change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProperty {
    /// Display name.
    pub name: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Asking price.
    pub price: Option<Decimal>,
    /// Year built.
    pub year: Option<i32>,
    /// Free-text description.
    pub description: Option<String>,
    /// Kind of building or lot.
    pub property_type: Option<PropertyType>,
    /// Market status.
    pub status: Option<PropertyStatus>,
    /// Sale, rent or both.
    pub listing_type: Option<ListingType>,
    /// Physical condition.
    pub condition: Option<PropertyCondition>,
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
    /// State or region.
    pub state: Option<String>,
    /// Postal code, `12345` or `12345-6789`.
    pub zip_code: Option<String>,
    /// Neighborhood.
    pub neighborhood: Option<String>,
    /// Latitude in degrees.
    pub latitude: Option<Decimal>,
    /// Longitude in degrees.
    pub longitude: Option<Decimal>,
    /// Pool flag.
    pub has_pool: Option<bool>,
    /// Garden flag.
    pub has_garden: Option<bool>,
    /// Garage flag.
    pub has_garage: Option<bool>,
    /// Fireplace flag.
    pub has_fireplace: Option<bool>,
    /// Air conditioning flag.
    pub has_air_conditioning: Option<bool>,
    /// Heating flag.
    pub has_heating: Option<bool>,
    /// Furnished flag.
    pub is_furnished: Option<bool>,
    /// Pets flag.
    pub pets_allowed: Option<bool>,
    /// Monthly rent, for rentals.
    pub monthly_rent: Option<Decimal>,
    /// Yearly property tax.
    pub property_tax: Option<Decimal>,
    /// Homeowners association fees.
    pub hoa_fees: Option<Decimal>,
    /// Date the property can be occupied.
    pub available_from: Option<DateTime<Utc>>,
    /// Closing date of a sale.
    pub sold_date: Option<DateTime<Utc>>,
}

/// Price change with an optional reason for the history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChangePrice {
    /// Price to set; must be positive.
    pub new_price: Decimal,
    /// Appended to the trace description.
    pub reason: Option<String>,
}

impl ChangePrice {
    /// Price change without a reason.
    #[must_use]
    pub fn to(new_price: Decimal) -> Self {
        Self {
            new_price,
            reason: None,
        }
    }

    /// Attaches a reason.
    #[must_use]
    pub fn because(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// New owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateOwner {
    /// Full name.
    pub name: String,
    /// Mailing address.
    pub address: String,
    /// Photo location.
    pub photo: Option<String>,
    /// Date of birth.
    pub birthday: Option<NaiveDate>,
    /// Phone number.
    pub phone: Option<String>,
    /// Email, unique ignoring case.
    pub email: Option<String>,
    /// Identity document kind.
    pub document_type: Option<String>,
    /// Identity document number.
    pub document_number: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or region.
    pub state: Option<String>,
    /// Postal code.
    pub zip_code: Option<String>,
    /// Defaults to "USA" when absent.
    pub country: Option<String>,
}

impl CreateOwner {
    /// Owner with just the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            ..Self::default()
        }
    }

    /// Sets the email.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the identity document.
    #[must_use]
    pub fn document(mut self, ty: impl Into<String>, number: impl Into<String>) -> Self {
        self.document_type = Some(ty.into());
        self.document_number = Some(number.into());
        self
    }
}

/// New image for a property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AddImage {
    /// Property the image belongs to.
    pub property_id: EntityId,
    /// Image location; must carry an image extension.
    pub file: String,
    /// Caption.
    pub title: Option<String>,
    /// Longer caption.
    pub description: Option<String>,
    /// `None` or `Some(0)` appends after the current last image. At most 10000.
    pub display_order: Option<u32>,
    /// Whether the image is the cover.
    pub is_primary: bool,
    /// Size of the file.
    pub file_size_bytes: Option<u64>,
}

impl AddImage {
    /// Image with just a file.
    #[must_use]
    pub fn new(property_id: EntityId, file: impl Into<String>) -> Self {
        Self {
            property_id,
            file: file.into(),
            ..Self::default()
        }
    }

    /// Marks the image as the cover.
    #[must_use]
    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    /// Places the image at an explicit position.
    #[must_use]
    pub fn at(mut self, display_order: u32) -> Self {
        self.display_order = Some(display_order);
        self
    }
}

/// Partial update of an image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateImage {
    /// Image location; must carry an image extension.
    pub file: Option<String>,
    /// Caption.
    pub title: Option<String>,
    /// Longer caption.
    pub description: Option<String>,
    /// Position in the gallery, taken as given.
    pub display_order: Option<u32>,
    /// Hidden from galleries when false.
    pub enabled: Option<bool>,
    /// Whether the image is the cover.
    pub is_primary: Option<bool>,
}

/// Treats blank strings as absent.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
