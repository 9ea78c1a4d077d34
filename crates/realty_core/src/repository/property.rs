use crate::entity::EntityId;
use crate::model::Property;
use crate::repository::contains_ci;
use crate::store::EntityView;

/// Property queries. Every method sees active properties only.
pub trait PropertyRepository: EntityView {
    /// Active property by id.
    fn active_property(&self, id: EntityId) -> Option<Property> {
        self.get::<Property>(id).filter(Property::is_active)
    }

    /// Active property carrying `code`.
    fn property_by_code(&self, code: &str) -> Option<Property> {
        let code = code.trim();
        self.find(|p: &Property| p.is_active() && p.code_internal == code)
            .into_iter()
            .next()
    }

    /// Whether an active property already uses `code`.
    fn code_exists(&self, code: &str) -> bool {
        self.property_by_code(code).is_some()
    }

    /// Every active property.
    fn active_properties(&self) -> Vec<Property> {
        self.find(Property::is_active)
    }

    /// Active properties of one owner, newest first.
    fn properties_by_owner(&self, owner_id: EntityId) -> Vec<Property> {
        let mut found = self.find(|p: &Property| p.is_active() && p.owner_id == owner_id);
        found.sort_by(|a, b| b.audit.created_at.cmp(&a.audit.created_at));
        found
    }

    /// Active properties with status Available, newest first.
    fn available_properties(&self) -> Vec<Property> {
        let mut found = self.find(Property::is_available);
        found.sort_by(|a, b| b.audit.created_at.cmp(&a.audit.created_at));
        found
    }

    /// Active properties whose city contains `city`, optionally narrowed by
    /// state, ordered by name.
    fn properties_by_location(&self, city: &str, state: Option<&str>) -> Vec<Property> {
        let city = city.trim();
        let state = state.map(str::trim).filter(|s| !s.is_empty());
        let mut found = self.find(|p: &Property| {
            p.is_active()
                && p.city.as_deref().is_some_and(|c| contains_ci(c, city))
                && state.map_or(true, |s| {
                    p.state.as_deref().is_some_and(|ps| ps.eq_ignore_ascii_case(s))
                })
        });
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found
    }
}

impl<V: EntityView> PropertyRepository for V {}
