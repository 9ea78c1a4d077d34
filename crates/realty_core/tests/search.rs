//! Search ordering and per-criterion matching.

use realty_core::{
    CreateProperty, Estate, ListingType, Owner, PagedResult, PropertyCondition, PropertyFilter,
    PropertyStatus, PropertySummary, PropertyType, SortDirection, SortKey, UpdateProperty,
};
use realty_testkit::prelude::*;
use rust_decimal_macros::dec;

fn list_with(
    estate: &Estate,
    owner: &Owner,
    code: &str,
    edit: impl FnOnce(&mut CreateProperty),
) -> realty_core::EntityId {
    let mut request = scenarios::property_request(owner, code, 100_000);
    edit(&mut request);
    estate
        .properties()
        .create_property(request)
        .unwrap()
        .property
        .id()
}

fn codes(page: &PagedResult<PropertySummary>) -> Vec<String> {
    page.items
        .iter()
        .map(|row| row.property.code_internal.clone())
        .collect()
}

fn sorted(estate: &Estate, key: SortKey, direction: SortDirection) -> Vec<String> {
    let filter = PropertyFilter::new().page(1, 50).sort(key, direction);
    codes(&estate.properties().search(&filter))
}

fn matching(estate: &Estate, filter: PropertyFilter) -> Vec<String> {
    let mut found = codes(&estate.properties().search(&filter.page(1, 50)));
    found.sort();
    found
}

#[test]
fn price_orders_both_ways() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        scenarios::listing(estate, &owner, "MID", 200_000);
        scenarios::listing(estate, &owner, "LOW", 100_000);
        scenarios::listing(estate, &owner, "HIGH", 300_000);

        assert_eq!(
            sorted(estate, SortKey::Price, SortDirection::Ascending),
            ["LOW", "MID", "HIGH"]
        );
        assert_eq!(
            sorted(estate, SortKey::Price, SortDirection::Descending),
            ["HIGH", "MID", "LOW"]
        );
    });
}

#[test]
fn name_orders_ignoring_case() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        list_with(estate, &owner, "B", |r| r.name = "birch House".into());
        list_with(estate, &owner, "C", |r| r.name = "Cedar House".into());
        list_with(estate, &owner, "A", |r| r.name = "Aspen House".into());

        assert_eq!(sorted(estate, SortKey::Name, SortDirection::Ascending), ["A", "B", "C"]);
        assert_eq!(sorted(estate, SortKey::Name, SortDirection::Descending), ["C", "B", "A"]);
    });
}

#[test]
fn never_updated_rows_sort_first_by_update_time() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        let first = scenarios::listing(estate, &owner, "U1", 100_000).property.id();
        scenarios::listing(estate, &owner, "N1", 100_000);
        let second = scenarios::listing(estate, &owner, "U2", 100_000).property.id();

        let touch = |id| {
            let update = UpdateProperty {
                bedrooms: Some(3),
                ..UpdateProperty::default()
            };
            estate.properties().update_property(id, update).unwrap();
        };
        touch(second);
        touch(first);

        assert_eq!(
            sorted(estate, SortKey::UpdatedAt, SortDirection::Ascending),
            ["N1", "U2", "U1"]
        );
        assert_eq!(
            sorted(estate, SortKey::UpdatedAt, SortDirection::Descending),
            ["U1", "U2", "N1"]
        );
    });
}

#[test]
fn equal_keys_fall_back_to_creation_order() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        for code in ["T1", "T2", "T3"] {
            scenarios::listing(estate, &owner, code, 150_000);
        }

        assert_eq!(sorted(estate, SortKey::Price, SortDirection::Ascending), ["T1", "T2", "T3"]);
        assert_eq!(sorted(estate, SortKey::Price, SortDirection::Descending), ["T1", "T2", "T3"]);
        assert_eq!(
            sorted(estate, SortKey::CreatedAt, SortDirection::Descending),
            ["T3", "T2", "T1"]
        );
    });
}

#[test]
fn absent_counts_sort_first() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        list_with(estate, &owner, "TWO", |r| r.bedrooms = Some(2));
        list_with(estate, &owner, "NONE", |_| {});
        list_with(estate, &owner, "ONE", |r| r.bedrooms = Some(1));

        assert_eq!(
            sorted(estate, SortKey::Bedrooms, SortDirection::Ascending),
            ["NONE", "ONE", "TWO"]
        );
    });
}

#[test]
fn search_term_reaches_every_text_field() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        list_with(estate, &owner, "NAME", |r| r.name = "Quartz Cottage".into());
        list_with(estate, &owner, "ADDR", |r| r.address = "9 Quartz Lane".into());
        list_with(estate, &owner, "DESC", |r| {
            r.description = Some("Quartz countertops throughout".into());
        });
        list_with(estate, &owner, "CITY", |r| r.city = Some("Quartzsite".into()));
        list_with(estate, &owner, "HOOD", |r| r.neighborhood = Some("Quartz Hill".into()));
        list_with(estate, &owner, "QUARTZ-7", |r| {
            r.name = "Plain Lot".into();
            r.address = "1 Elm Street".into();
        });
        list_with(estate, &owner, "MISS", |_| {});

        assert_eq!(
            matching(estate, PropertyFilter::new().search("quartz")),
            ["ADDR", "CITY", "DESC", "HOOD", "NAME", "QUARTZ-7"]
        );
        assert_eq!(matching(estate, PropertyFilter::new().search("harbor")).len(), 5);
        assert_eq!(matching(estate, PropertyFilter::new().search("   ")).len(), 7);
    });
}

#[test]
fn category_filters_match_exactly() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        list_with(estate, &owner, "CONDO", |r| {
            r.property_type = PropertyType::Condo;
            r.listing_type = ListingType::Rent;
        });
        list_with(estate, &owner, "VILLA", |r| {
            r.property_type = PropertyType::Villa;
            r.condition = PropertyCondition::NeedsRenovation;
        });
        let sold = list_with(estate, &owner, "SOLD", |_| {});
        let update = UpdateProperty {
            status: Some(PropertyStatus::Sold),
            ..UpdateProperty::default()
        };
        estate.properties().update_property(sold, update).unwrap();

        assert_eq!(
            matching(estate, PropertyFilter::new().property_type(PropertyType::Condo)),
            ["CONDO"]
        );
        assert_eq!(
            matching(estate, PropertyFilter::new().status(PropertyStatus::Sold)),
            ["SOLD"]
        );
        assert_eq!(
            matching(estate, PropertyFilter::new().status(PropertyStatus::Available)),
            ["CONDO", "VILLA"]
        );

        let mut by_listing = PropertyFilter::new();
        by_listing.listing_type = Some(ListingType::Rent);
        assert_eq!(matching(estate, by_listing), ["CONDO"]);

        let mut by_condition = PropertyFilter::new();
        by_condition.condition = Some(PropertyCondition::NeedsRenovation);
        assert_eq!(matching(estate, by_condition), ["VILLA"]);
    });
}

#[test]
fn amenity_flags_match_true_and_false() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        list_with(estate, &owner, "POOL", |r| {
            r.has_pool = true;
            r.pets_allowed = true;
        });
        list_with(estate, &owner, "DRY", |r| r.has_garage = true);

        assert_eq!(matching(estate, PropertyFilter::new().has_pool(true)), ["POOL"]);
        assert_eq!(matching(estate, PropertyFilter::new().has_pool(false)), ["DRY"]);

        let mut garage_and_pets = PropertyFilter::new();
        garage_and_pets.has_garage = Some(true);
        garage_and_pets.pets_allowed = Some(true);
        assert!(matching(estate, garage_and_pets).is_empty());

        let mut pets = PropertyFilter::new();
        pets.pets_allowed = Some(true);
        assert_eq!(matching(estate, pets), ["POOL"]);

        let cheap_pool = PropertyFilter::new()
            .has_pool(true)
            .price_between(Some(dec!(1)), Some(dec!(99999)));
        assert!(matching(estate, cheap_pool).is_empty());
    });
}
