use crate::dto::{present, AddImage, UpdateImage};
use crate::entity::{AuditInfo, EntityId};
use crate::error::{CoreError, CoreResult};
use crate::estate::Estate;
use crate::model::PropertyImage;
use crate::repository::{ImageRepository, PropertyRepository};
use crate::store::WriteTransaction;
use crate::types::EntityKind;
use crate::validation::{self, file_extension};
use tracing::{debug, info, warn};

/// Gallery management for properties.
///
/// Keeps at most one enabled primary image per property: every operation
/// that leaves an image primary and enabled demotes the others in the same
/// transaction.
#[derive(Debug, Clone)]
pub struct ImageService {
    estate: Estate,
}

fn load(tx: &WriteTransaction<'_>, id: EntityId) -> CoreResult<PropertyImage> {
    tx.image(id).ok_or_else(|| {
        warn!(image_id = %id, "image not found");
        CoreError::not_found(EntityKind::Image, "Image not found")
    })
}

/// Clears `is_primary` on every image of the property except `keep`.
fn demote_others(
    tx: &mut WriteTransaction<'_>,
    property_id: EntityId,
    keep: Option<EntityId>,
) -> CoreResult<usize> {
    let mut demoted = 0;
    for mut image in tx.images_of(property_id) {
        if image.is_primary && Some(image.id()) != keep {
            image.is_primary = false;
            image.audit.touch();
            tx.put(image)?;
            demoted += 1;
        }
    }
    if demoted > 0 {
        debug!(property_id = %property_id, demoted, "cleared previous primary images");
    }
    Ok(demoted)
}

/// `dir/stem_thumb.ext`, keeping the separator style of the input.
fn thumbnail_path(file: &str) -> Option<String> {
    let split = file.rfind(['/', '\\']);
    let (dir, name) = match split {
        Some(at) => (&file[..=at], &file[at + 1..]),
        None => ("", file),
    };
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(format!("{dir}{stem}_thumb.{ext}"))
}

impl ImageService {
    pub(crate) fn new(estate: Estate) -> Self {
        Self { estate }
    }

    /// Attaches an image to an active property.
    ///
    /// Without an explicit position (or with position 0) the image goes
    /// after the current last one.
    pub fn add_image(&self, request: AddImage) -> CoreResult<PropertyImage> {
        validation::add_image(&request)?;
        let property_id = request.property_id;

        let image = self.estate.write(|tx| {
            if tx.active_property(property_id).is_none() {
                warn!(property_id = %property_id, "property not found");
                return Err(CoreError::not_found(EntityKind::Property, "Property not found"));
            }

            let display_order = match request.display_order {
                Some(order) if order > 0 => order,
                _ => tx.max_display_order(property_id).checked_add(1).ok_or_else(|| {
                    CoreError::business_rule("Display order limit reached for this property")
                })?,
            };
            if request.is_primary {
                demote_others(tx, property_id, None)?;
            }

            let file = request.file.trim().to_string();
            let image = PropertyImage {
                audit: AuditInfo::new(),
                property_id,
                file_type: file_extension(&file),
                thumbnail_path: thumbnail_path(&file),
                file,
                enabled: true,
                title: present(&request.title).map(str::to_string),
                description: present(&request.description).map(str::to_string),
                display_order,
                is_primary: request.is_primary,
                file_size_bytes: request.file_size_bytes,
            };
            tx.put(image.clone())?;
            Ok(image)
        })?;

        info!(image_id = %image.id(), property_id = %property_id, display_order = image.display_order, "image added");
        Ok(image)
    }

    /// Makes an image the cover of its property.
    pub fn set_primary(&self, image_id: EntityId) -> CoreResult<PropertyImage> {
        let image = self.estate.write(|tx| {
            let mut image = load(tx, image_id)?;
            demote_others(tx, image.property_id, Some(image_id))?;
            image.is_primary = true;
            image.audit.touch();
            tx.put(image.clone())?;
            Ok(image)
        })?;
        info!(image_id = %image_id, property_id = %image.property_id, "primary image set");
        Ok(image)
    }

    /// Removes an image. Deleting the primary promotes the first remaining
    /// enabled image, if any.
    pub fn delete_image(&self, image_id: EntityId) -> CoreResult<()> {
        let promoted = self.estate.write(|tx| {
            let image = load(tx, image_id)?;
            tx.delete::<PropertyImage>(image_id)?;
            if !image.is_primary {
                return Ok(None);
            }
            match tx.enabled_images_of(image.property_id).into_iter().next() {
                Some(mut next) => {
                    next.is_primary = true;
                    next.audit.touch();
                    let id = next.id();
                    tx.put(next)?;
                    Ok(Some(id))
                }
                None => Ok(None),
            }
        })?;
        info!(image_id = %image_id, promoted = ?promoted, "image deleted");
        Ok(())
    }

    /// Partially updates an image.
    pub fn update_image(&self, image_id: EntityId, request: UpdateImage) -> CoreResult<PropertyImage> {
        validation::update_image(&request)?;

        let image = self.estate.write(|tx| {
            let mut image = load(tx, image_id)?;
            if let Some(file) = present(&request.file) {
                image.file = file.to_string();
                image.file_type = file_extension(file);
                image.thumbnail_path = thumbnail_path(file);
            }
            if let Some(title) = present(&request.title) {
                image.title = Some(title.to_string());
            }
            if let Some(description) = present(&request.description) {
                image.description = Some(description.to_string());
            }
            if let Some(order) = request.display_order {
                image.display_order = order;
            }
            if let Some(enabled) = request.enabled {
                image.enabled = enabled;
            }
            if let Some(primary) = request.is_primary {
                image.is_primary = primary;
            }
            image.audit.touch();

            if image.is_effective_primary() {
                demote_others(tx, image.property_id, Some(image_id))?;
            }
            tx.put(image.clone())?;
            Ok(image)
        })?;

        info!(image_id = %image_id, "image updated");
        Ok(image)
    }

    /// Enabled images of a property in gallery order.
    #[must_use]
    pub fn images_by_property(&self, property_id: EntityId) -> Vec<PropertyImage> {
        self.estate.read().enabled_images_of(property_id)
    }

    /// The enabled primary image of a property.
    #[must_use]
    pub fn primary_image(&self, property_id: EntityId) -> Option<PropertyImage> {
        self.estate.read().primary_image_of(property_id)
    }

    /// Every image of a property, including disabled ones.
    #[must_use]
    pub fn all_images(&self, property_id: EntityId) -> Vec<PropertyImage> {
        self.estate.read().images_of(property_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_keeps_directory() {
        assert_eq!(
            thumbnail_path("photos/house/front.jpg").as_deref(),
            Some("photos/house/front_thumb.jpg")
        );
        assert_eq!(thumbnail_path("front.png").as_deref(), Some("front_thumb.png"));
        assert_eq!(
            thumbnail_path(r"C:\img\a.b.webp").as_deref(),
            Some(r"C:\img\a.b_thumb.webp")
        );
    }

    #[test]
    fn thumbnail_needs_extension() {
        assert_eq!(thumbnail_path("photos/front"), None);
        assert_eq!(thumbnail_path("photos/.jpg"), None);
    }
}
