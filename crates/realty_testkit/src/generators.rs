//! Property-based test generators using proptest.

use proptest::prelude::*;
use realty_core::{
    ChangePrice, CreateProperty, EntityId, PropertyFilter, PropertyType, SortDirection, SortKey,
};
use rust_decimal::Decimal;

/// Strategy for positive prices with cents, up to ten million.
pub fn price_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for property types.
pub fn property_type_strategy() -> impl Strategy<Value = PropertyType> {
    prop::sample::select(PropertyType::ALL.to_vec())
}

/// Strategy for the cities listings are placed in.
pub fn city_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Miami", "Austin", "Denver", "Boston", "Seattle"])
        .prop_map(str::to_string)
}

/// Strategy for valid create requests owned by `owner_id`.
///
/// Codes are left empty; callers assign unique ones.
pub fn create_property_strategy(owner_id: EntityId) -> impl Strategy<Value = CreateProperty> {
    (
        "[A-Z][a-z]{2,10}( [A-Z][a-z]{2,8})?",
        price_strategy(),
        1800i32..=2030,
        property_type_strategy(),
        prop::option::of(0u32..8),
        prop::option::of(city_strategy()),
        any::<bool>(),
    )
        .prop_map(
            move |(name, price, year, property_type, bedrooms, city, has_pool)| CreateProperty {
                address: format!("{} Elm Street", name.len()),
                name,
                price,
                year,
                property_type,
                bedrooms,
                city,
                has_pool,
                owner_id,
                ..CreateProperty::default()
            },
        )
}

/// Strategy for batches of create requests with unique codes `G0..Gn`.
pub fn listing_batch_strategy(
    owner_id: EntityId,
    max: usize,
) -> impl Strategy<Value = Vec<CreateProperty>> {
    prop::collection::vec(create_property_strategy(owner_id), 0..=max).prop_map(|requests| {
        requests
            .into_iter()
            .enumerate()
            .map(|(i, mut request)| {
                request.code_internal = format!("G{i}");
                request
            })
            .collect()
    })
}

/// Strategy for sort keys.
pub fn sort_key_strategy() -> impl Strategy<Value = SortKey> {
    prop::sample::select(SortKey::ALL.to_vec())
}

/// Strategy for search filters mixing criteria, sorting and paging.
pub fn filter_strategy() -> impl Strategy<Value = PropertyFilter> {
    (
        prop::option::of(prop::sample::select(vec!["a", "e", "ar", "street"])),
        prop::option::of(price_strategy()),
        prop::option::of(property_type_strategy()),
        prop::option::of(city_strategy()),
        prop::option::of(any::<bool>()),
        sort_key_strategy(),
        any::<bool>(),
        1u32..5,
        0u32..8,
    )
        .prop_map(
            |(search, min_price, property_type, city, has_pool, key, ascending, page, size)| {
                let mut filter = PropertyFilter::new().page(page, size);
                filter.search_term = search.map(str::to_string);
                filter.min_price = min_price;
                filter.property_type = property_type;
                filter.city = city;
                filter.has_pool = has_pool;
                filter.sort_by = key;
                filter.sort_direction = if ascending {
                    SortDirection::Ascending
                } else {
                    SortDirection::Descending
                };
                filter
            },
        )
}

/// Strategy for a run of price changes.
pub fn price_changes_strategy(max: usize) -> impl Strategy<Value = Vec<ChangePrice>> {
    prop::collection::vec(
        (price_strategy(), prop::option::of("[a-z]{3,12}")),
        0..=max,
    )
    .prop_map(|changes| {
        changes
            .into_iter()
            .map(|(price, reason)| match reason {
                Some(reason) => ChangePrice::to(price).because(reason),
                None => ChangePrice::to(price),
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn prices_are_positive(price in price_strategy()) {
            prop_assert!(price > Decimal::ZERO);
        }

        #[test]
        fn batches_have_unique_codes(batch in listing_batch_strategy(EntityId::new(), 6)) {
            let mut codes: Vec<_> = batch.iter().map(|r| r.code_internal.clone()).collect();
            codes.sort();
            codes.dedup();
            prop_assert_eq!(codes.len(), batch.len());
        }
    }
}
