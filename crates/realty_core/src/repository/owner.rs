use crate::entity::EntityId;
use crate::model::Owner;
use crate::repository::contains_ci;
use crate::store::EntityView;

/// Owner queries. Every method sees active owners only.
pub trait OwnerRepository: EntityView {
    /// Active owner by id.
    fn active_owner(&self, id: EntityId) -> Option<Owner> {
        self.get::<Owner>(id).filter(Owner::is_active)
    }

    /// Active owner with this email, ignoring case.
    fn owner_by_email(&self, email: &str) -> Option<Owner> {
        let email = email.trim().to_lowercase();
        self.find(|o: &Owner| {
            o.is_active()
                && o
                    .email
                    .as_deref()
                    .is_some_and(|e| e.trim().to_lowercase() == email)
        })
        .into_iter()
        .next()
    }

    /// Active owner holding this identity document.
    fn owner_by_document(&self, document_type: &str, document_number: &str) -> Option<Owner> {
        let (ty, number) = (document_type.trim(), document_number.trim());
        self.find(|o: &Owner| {
            o.is_active()
                && o.document_type.as_deref().map(str::trim) == Some(ty)
                && o.document_number.as_deref().map(str::trim) == Some(number)
        })
        .into_iter()
        .next()
    }

    /// Active owners whose name contains `name`, ordered by name.
    fn owners_named(&self, name: &str) -> Vec<Owner> {
        let name = name.trim();
        let mut found = self.find(|o: &Owner| o.is_active() && contains_ci(&o.name, name));
        found.sort_by(|a, b| a.name.cmp(&b.name).then(a.id().cmp(&b.id())));
        found
    }
}

impl<V: EntityView> OwnerRepository for V {}
