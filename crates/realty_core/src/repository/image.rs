use crate::entity::EntityId;
use crate::model::PropertyImage;
use crate::store::EntityView;

fn gallery_order(images: &mut [PropertyImage]) {
    images.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then(a.audit.created_at.cmp(&b.audit.created_at))
            .then(a.id().cmp(&b.id()))
    });
}

/// Image queries. Results are in gallery order: display order, then
/// creation time, then id.
pub trait ImageRepository: EntityView {
    /// Image by id.
    fn image(&self, id: EntityId) -> Option<PropertyImage> {
        self.get::<PropertyImage>(id).filter(|i| i.audit.active)
    }

    /// Every image of a property, enabled or not.
    fn images_of(&self, property_id: EntityId) -> Vec<PropertyImage> {
        let mut found =
            self.find(|i: &PropertyImage| i.audit.active && i.property_id == property_id);
        gallery_order(&mut found);
        found
    }

    /// Enabled images of a property.
    fn enabled_images_of(&self, property_id: EntityId) -> Vec<PropertyImage> {
        let mut found = self.find(|i: &PropertyImage| {
            i.audit.active && i.enabled && i.property_id == property_id
        });
        gallery_order(&mut found);
        found
    }

    /// The enabled primary image of a property.
    fn primary_image_of(&self, property_id: EntityId) -> Option<PropertyImage> {
        self.enabled_images_of(property_id)
            .into_iter()
            .find(PropertyImage::is_effective_primary)
    }

    /// Highest display order among a property's images, 0 when it has none.
    fn max_display_order(&self, property_id: EntityId) -> u32 {
        self.images_of(property_id)
            .iter()
            .map(|i| i.display_order)
            .max()
            .unwrap_or(0)
    }
}

impl<V: EntityView> ImageRepository for V {}
