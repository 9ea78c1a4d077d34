//! Read models assembled from entities.

use crate::model::{Owner, Property, PropertyImage, PropertyTrace};
use crate::service::format_currency;
use serde::Serialize;

/// The cover image, or the first enabled image when none is marked.
fn cover_url(images: &[PropertyImage]) -> Option<String> {
    images
        .iter()
        .find(|i| i.is_effective_primary())
        .or_else(|| images.iter().find(|i| i.enabled))
        .map(|i| i.file.clone())
}

/// One row of a property search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySummary {
    /// The property.
    pub property: Property,
    /// Owner name, when the owner is still active.
    pub owner_name: Option<String>,
    /// Price as display currency.
    pub formatted_price: String,
    /// Cover image location.
    pub primary_image_url: Option<String>,
    /// Enabled images.
    pub image_count: usize,
}

impl PropertySummary {
    /// Builds a row from a property, its owner and its enabled images.
    #[must_use]
    pub fn from_parts(property: Property, owner: Option<&Owner>, images: &[PropertyImage]) -> Self {
        Self {
            formatted_price: format_currency(property.price),
            owner_name: owner.map(|o| o.name.clone()),
            primary_image_url: cover_url(images),
            image_count: images.iter().filter(|i| i.enabled).count(),
            property,
        }
    }
}

/// A property with everything attached to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    /// The property.
    pub property: Property,
    /// Owner, when still active.
    pub owner: Option<Owner>,
    /// Price as display currency.
    pub formatted_price: String,
    /// Cover image location.
    pub primary_image_url: Option<String>,
    /// Enabled images in gallery order.
    pub images: Vec<PropertyImage>,
    /// History, newest first.
    pub traces: Vec<PropertyTrace>,
}

impl PropertyDetails {
    /// Assembles the full view.
    #[must_use]
    pub fn from_parts(
        property: Property,
        owner: Option<Owner>,
        images: Vec<PropertyImage>,
        traces: Vec<PropertyTrace>,
    ) -> Self {
        Self {
            formatted_price: format_currency(property.price),
            primary_image_url: cover_url(&images),
            property,
            owner,
            images,
            traces,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{AuditInfo, EntityId};

    fn image(file: &str, primary: bool, enabled: bool) -> PropertyImage {
        PropertyImage {
            audit: AuditInfo::new(),
            property_id: EntityId::nil(),
            file: file.into(),
            enabled,
            title: None,
            description: None,
            display_order: 1,
            is_primary: primary,
            file_type: None,
            file_size_bytes: None,
            thumbnail_path: None,
        }
    }

    #[test]
    fn cover_prefers_enabled_primary() {
        let images = vec![image("a.jpg", false, true), image("b.jpg", true, true)];
        assert_eq!(cover_url(&images).as_deref(), Some("b.jpg"));
    }

    #[test]
    fn cover_falls_back_to_first_enabled() {
        let images = vec![image("a.jpg", true, false), image("b.jpg", false, true)];
        assert_eq!(cover_url(&images).as_deref(), Some("b.jpg"));
        assert_eq!(cover_url(&[]), None);
    }
}
