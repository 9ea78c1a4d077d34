//! Envelope-returning facade.

use crate::dto::{AddImage, ChangePrice, CreateOwner, CreateProperty, UpdateImage, UpdateProperty};
use crate::entity::EntityId;
use crate::error::CoreResult;
use crate::estate::Estate;
use crate::mapping::{PropertyDetails, PropertySummary};
use crate::model::{Owner, PropertyImage, PropertyTrace, PropertyType};
use crate::query::{PagedResult, PropertyFilter};
use crate::response::ApiResponse;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::error;

/// Every listing operation, answered with an [`ApiResponse`].
///
/// Business failures keep their message and status; anything else is
/// logged here and answered with a generic 500.
#[derive(Debug, Clone)]
pub struct ListingApi {
    estate: Estate,
}

impl ListingApi {
    pub(crate) fn new(estate: Estate) -> Self {
        Self { estate }
    }

    fn respond<T>(
        &self,
        operation: &str,
        result: CoreResult<T>,
        success: &str,
        failure: &str,
    ) -> ApiResponse<T> {
        match result {
            Ok(data) => ApiResponse::success(data, success),
            Err(err) => {
                if !err.is_client_error() {
                    error!(operation, error = %err, retryable = err.is_retryable(), "operation failed");
                }
                ApiResponse::from_error(&err, failure, self.estate.config().expose_error_details)
            }
        }
    }

    /// Lists a property.
    pub fn create_property(&self, request: CreateProperty) -> ApiResponse<PropertyDetails> {
        self.respond(
            "create_property",
            self.estate.properties().create_property(request),
            "Property created successfully",
            "An error occurred while creating the property",
        )
    }

    /// Full property view.
    pub fn get_property(&self, id: EntityId) -> ApiResponse<PropertyDetails> {
        self.respond(
            "get_property",
            self.estate.properties().get_property(id),
            "Success",
            "An error occurred while retrieving the property",
        )
    }

    /// Full property view by listing code.
    pub fn get_property_by_code(&self, code: &str) -> ApiResponse<PropertyDetails> {
        self.respond(
            "get_property_by_code",
            self.estate.properties().get_by_code(code),
            "Success",
            "An error occurred while retrieving the property",
        )
    }

    /// Property search. Page sizes above the configured maximum are capped.
    pub fn search_properties(&self, filter: PropertyFilter) -> ApiResponse<PagedResult<PropertySummary>> {
        let mut filter = filter;
        filter.page_size = filter.page_size.min(self.estate.config().max_page_size);
        ApiResponse::ok(self.estate.properties().search(&filter))
    }

    /// Active properties of an owner.
    pub fn properties_by_owner(&self, owner_id: EntityId) -> ApiResponse<Vec<PropertySummary>> {
        ApiResponse::ok(self.estate.properties().properties_by_owner(owner_id))
    }

    /// Properties on the market.
    pub fn available_properties(&self) -> ApiResponse<Vec<PropertySummary>> {
        ApiResponse::ok(self.estate.properties().available_properties())
    }

    /// Properties in a city, optionally narrowed to a state.
    pub fn properties_by_location(
        &self,
        city: &str,
        state: Option<&str>,
    ) -> ApiResponse<Vec<PropertySummary>> {
        ApiResponse::ok(self.estate.properties().properties_by_location(city, state))
    }

    /// Mean available price of a type; `data` is `None` when nothing matches.
    pub fn average_price_by_type(&self, property_type: PropertyType) -> ApiResponse<Option<Decimal>> {
        ApiResponse::ok(self.estate.properties().average_price_by_type(property_type))
    }

    /// Partial property update.
    pub fn update_property(&self, id: EntityId, request: UpdateProperty) -> ApiResponse<PropertyDetails> {
        self.respond(
            "update_property",
            self.estate.properties().update_property(id, request),
            "Property updated successfully",
            "An error occurred while updating the property",
        )
    }

    /// Price change.
    pub fn change_price(&self, id: EntityId, request: ChangePrice) -> ApiResponse<PropertyDetails> {
        self.respond(
            "change_price",
            self.estate.properties().change_price(id, request),
            "Price updated successfully",
            "An error occurred while changing the price",
        )
    }

    /// Soft delete of a property.
    pub fn delete_property(&self, id: EntityId) -> ApiResponse<bool> {
        self.respond(
            "delete_property",
            self.estate.properties().delete_property(id).map(|()| true),
            "Property deleted successfully",
            "An error occurred while deleting the property",
        )
    }

    /// Property history, newest first.
    pub fn property_history(&self, id: EntityId) -> ApiResponse<Vec<PropertyTrace>> {
        self.respond(
            "property_history",
            self.estate.properties().property_history(id),
            "Success",
            "An error occurred while retrieving the property history",
        )
    }

    /// Latest trace of a property.
    pub fn last_trace(&self, id: EntityId) -> ApiResponse<Option<PropertyTrace>> {
        self.respond(
            "last_trace",
            self.estate.properties().last_trace(id),
            "Success",
            "An error occurred while retrieving the property history",
        )
    }

    /// Traces dated within `[from, to]`.
    pub fn traces_between(
        &self,
        id: EntityId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ApiResponse<Vec<PropertyTrace>> {
        self.respond(
            "traces_between",
            self.estate.properties().traces_between(id, from, to),
            "Success",
            "An error occurred while retrieving the property history",
        )
    }

    /// Adds an image.
    pub fn add_image(&self, request: AddImage) -> ApiResponse<PropertyImage> {
        self.respond(
            "add_image",
            self.estate.images().add_image(request),
            "Image added successfully",
            "An error occurred while adding the image",
        )
    }

    /// Makes an image the cover.
    pub fn set_primary_image(&self, image_id: EntityId) -> ApiResponse<PropertyImage> {
        self.respond(
            "set_primary_image",
            self.estate.images().set_primary(image_id),
            "Primary image set successfully",
            "An error occurred while setting primary image",
        )
    }

    /// Removes an image.
    pub fn delete_image(&self, image_id: EntityId) -> ApiResponse<bool> {
        self.respond(
            "delete_image",
            self.estate.images().delete_image(image_id).map(|()| true),
            "Image deleted successfully",
            "An error occurred while deleting the image",
        )
    }

    /// Partial image update.
    pub fn update_image(&self, image_id: EntityId, request: UpdateImage) -> ApiResponse<PropertyImage> {
        self.respond(
            "update_image",
            self.estate.images().update_image(image_id, request),
            "Image updated successfully",
            "An error occurred while updating the image",
        )
    }

    /// Enabled images of a property.
    pub fn images_by_property(&self, property_id: EntityId) -> ApiResponse<Vec<PropertyImage>> {
        ApiResponse::ok(self.estate.images().images_by_property(property_id))
    }

    /// Cover image of a property, if any.
    pub fn primary_image(&self, property_id: EntityId) -> ApiResponse<Option<PropertyImage>> {
        ApiResponse::ok(self.estate.images().primary_image(property_id))
    }

    /// Registers an owner.
    pub fn create_owner(&self, request: CreateOwner) -> ApiResponse<Owner> {
        self.respond(
            "create_owner",
            self.estate.owners().create_owner(request),
            "Owner created successfully",
            "An error occurred while creating the owner",
        )
    }

    /// Owner by id.
    pub fn get_owner(&self, id: EntityId) -> ApiResponse<Owner> {
        self.respond(
            "get_owner",
            self.estate.owners().get_owner(id),
            "Success",
            "An error occurred while retrieving the owner",
        )
    }

    /// Owners by name.
    pub fn search_owners(&self, name: &str) -> ApiResponse<Vec<Owner>> {
        ApiResponse::ok(self.estate.owners().search_owners(name))
    }

    /// Soft delete of an owner.
    pub fn delete_owner(&self, id: EntityId) -> ApiResponse<bool> {
        self.respond(
            "delete_owner",
            self.estate.owners().delete_owner(id).map(|()| true),
            "Owner deleted successfully",
            "An error occurred while deleting the owner",
        )
    }
}
