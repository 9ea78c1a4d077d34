use crate::model::Property;
use crate::query::{PagedResult, PropertyFilter};
use crate::store::EntityView;

/// Runs a filter over the active properties of `view`.
///
/// The count is taken over every match; the order is total (sort key, then
/// creation time, then id) so consecutive pages never overlap.
pub fn search<V: EntityView>(view: &V, filter: &PropertyFilter) -> PagedResult<Property> {
    let mut matched = view.find(|p: &Property| p.is_active() && filter.matches(p));

    let (key, direction) = (filter.sort_by, filter.sort_direction);
    matched.sort_by(|a, b| {
        direction
            .apply(key.compare(a, b))
            .then_with(|| a.audit.created_at.cmp(&b.audit.created_at))
            .then_with(|| a.id().cmp(&b.id()))
    });

    PagedResult::paginate(matched, filter.page_number, filter.page_size)
}
