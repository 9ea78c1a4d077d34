//! End-to-end listing scenarios through the services and the facade.

use realty_core::{
    AddImage, ChangePrice, CoreError, CreateOwner, EntityKind, PropertyFilter, PropertyStatus,
    PropertyType, UpdateImage, UpdateProperty,
};
use realty_testkit::prelude::*;
use rust_decimal_macros::dec;

#[test]
fn create_records_a_listing_trace() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        let mut request = scenarios::property_request(&owner, "P1", 250_000);
        request.name = "House A".into();

        let resp = estate.api().create_property(request);
        assert!(resp.success);
        assert_eq!(resp.status_code, 200);
        let details = resp.data.unwrap();
        assert_eq!(details.traces.len(), 1);
        assert_eq!(details.traces[0].transaction_type.as_deref(), Some("Listing"));
        assert_eq!(details.traces[0].value, dec!(250000));
        assert_eq!(details.formatted_price, "$250,000.00");
        assert_eq!(details.property.status, PropertyStatus::Available);
    });
}

#[test]
fn duplicate_code_is_rejected() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        scenarios::listing(estate, &owner, "P1", 250_000);

        let resp = estate
            .api()
            .create_property(scenarios::property_request(&owner, "P1", 300_000));
        assert!(!resp.success);
        assert_eq!(resp.status_code, 400);
        assert_eq!(resp.message, "Property code already exists");
        assert_eq!(estate.properties().search(&PropertyFilter::new()).total_count, 1);
    });
}

#[test]
fn unknown_owner_is_not_found() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        let mut request = scenarios::property_request(&owner, "P1", 1);
        request.owner_id = realty_core::EntityId::new();

        let err = estate.properties().create_property(request).unwrap_err();
        assert!(matches!(
            err,
            CoreError::NotFound { entity: EntityKind::Owner, .. }
        ));
        assert_eq!(err.status_code(), 404);
    });
}

#[test]
fn same_price_twice_records_two_price_changes() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        let id = scenarios::listing(estate, &owner, "P1", 250_000).property.id();
        let service = estate.properties();

        service.change_price(id, ChangePrice::to(dec!(300000))).unwrap();
        service
            .change_price(id, ChangePrice::to(dec!(300000)).because("re-listed"))
            .unwrap();

        let history = service.property_history(id).unwrap();
        let changes: Vec<_> = history
            .iter()
            .filter(|t| t.transaction_type.as_deref() == Some("Price Change"))
            .collect();
        assert_eq!(changes.len(), 2);
        assert_eq!(history.len(), 3);
        assert!(changes.iter().any(|t| t.description.as_deref()
            == Some("Price changed from $300,000.00 to $300,000.00. Reason: re-listed")));
    });
}

#[test]
fn second_primary_demotes_the_first() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        let id = scenarios::listing(estate, &owner, "P1", 250_000).property.id();
        let images = estate.images();

        let first = images.add_image(AddImage::new(id, "a.jpg").primary()).unwrap();
        let second = images.add_image(AddImage::new(id, "b.jpg").primary()).unwrap();

        let all = images.all_images(id);
        let primaries: Vec<_> = all.iter().filter(|i| i.is_primary).collect();
        assert_eq!(primaries.len(), 1);
        assert_eq!(primaries[0].id(), second.id());
        assert_eq!(first.display_order, 1);
        assert_eq!(second.display_order, 2);
    });
}

#[test]
fn deleting_the_primary_promotes_the_remaining_image() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        let id = scenarios::listing(estate, &owner, "P1", 250_000).property.id();
        let images = estate.images();

        let cover = images.add_image(AddImage::new(id, "a.jpg").primary()).unwrap();
        let other = images.add_image(AddImage::new(id, "b.jpg")).unwrap();

        let resp = estate.api().delete_image(cover.id());
        assert_eq!(resp.data, Some(true));
        assert_eq!(resp.message, "Image deleted successfully");

        let primary = images.primary_image(id).unwrap();
        assert_eq!(primary.id(), other.id());
    });
}

#[test]
fn partial_update_applies_explicit_false() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        let mut request = scenarios::property_request(&owner, "P1", 250_000);
        request.has_pool = true;
        request.has_garden = true;
        let id = estate.properties().create_property(request).unwrap().property.id();

        let update = UpdateProperty {
            has_pool: Some(false),
            ..UpdateProperty::default()
        };
        let details = estate.properties().update_property(id, update).unwrap();
        assert!(!details.property.has_pool);
        assert!(details.property.has_garden);
        // No headline change, no new trace.
        assert_eq!(details.traces.len(), 1);
    });
}

#[test]
fn headline_update_is_traced_with_diffs() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        let id = scenarios::listing(estate, &owner, "P1", 250_000).property.id();

        let update = UpdateProperty {
            name: Some("Seaside Villa".into()),
            price: Some(dec!(275000)),
            ..UpdateProperty::default()
        };
        estate.properties().update_property(id, update).unwrap();

        let history = estate.properties().property_history(id).unwrap();
        let updated = history.iter().find(|t| t.name == "Property Updated").unwrap();
        assert_eq!(history.len(), 2);
        let description = updated.description.clone().unwrap();
        assert!(description.contains("Name: Listing P1 → Seaside Villa"));
        assert!(description.contains("Price: $250,000.00 → $275,000.00"));
    });
}

#[test]
fn deleted_property_disappears_but_keeps_history_rows() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        let id = scenarios::listing(estate, &owner, "P1", 250_000).property.id();

        assert_eq!(estate.api().delete_property(id).data, Some(true));
        assert_eq!(estate.properties().search(&PropertyFilter::new()).total_count, 0);
        assert_eq!(estate.api().get_property(id).status_code, 404);
        assert_eq!(estate.stats().unwrap().traces, 1);
    });
}

#[test]
fn owner_with_listings_cannot_be_deleted() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        let id = scenarios::listing(estate, &owner, "P1", 250_000).property.id();

        let resp = estate.api().delete_owner(owner.id());
        assert_eq!(resp.status_code, 400);
        assert_eq!(resp.message, "Owner has active properties");

        estate.properties().delete_property(id).unwrap();
        assert_eq!(estate.api().delete_owner(owner.id()).data, Some(true));
    });
}

#[test]
fn duplicate_owner_email_conflicts() {
    with_estate(|estate| {
        let api = estate.api();
        api.create_owner(CreateOwner::new("Ada", "1 Way").email("ada@example.com"));
        let resp = api.create_owner(CreateOwner::new("Ada Two", "2 Way").email("ADA@example.com"));
        assert_eq!(resp.status_code, 409);
        assert_eq!(resp.message, "Owner email already exists");
    });
}

#[test]
fn disabling_the_primary_leaves_no_cover() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        let id = scenarios::listing(estate, &owner, "P1", 250_000).property.id();
        let images = estate.images();
        let cover = images.add_image(AddImage::new(id, "a.jpg").primary()).unwrap();
        images.add_image(AddImage::new(id, "b.jpg")).unwrap();

        let update = UpdateImage {
            enabled: Some(false),
            ..UpdateImage::default()
        };
        images.update_image(cover.id(), update).unwrap();

        assert!(images.primary_image(id).is_none());
        assert_eq!(images.images_by_property(id).len(), 1);
        assert_eq!(images.all_images(id).len(), 2);
    });
}

#[test]
fn summaries_carry_owner_and_cover() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        let id = scenarios::listing(estate, &owner, "P1", 250_000).property.id();
        estate
            .images()
            .add_image(AddImage::new(id, "photos/front.png").primary())
            .unwrap();
        estate.images().add_image(AddImage::new(id, "photos/back.png")).unwrap();

        let page = estate.properties().search(&PropertyFilter::new());
        let row = &page.items[0];
        assert_eq!(row.owner_name.as_deref(), Some("Ada"));
        assert_eq!(row.primary_image_url.as_deref(), Some("photos/front.png"));
        assert_eq!(row.image_count, 2);
    });
}

#[test]
fn validation_errors_are_listed() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        let mut request = scenarios::property_request(&owner, "P1", 0);
        request.year = 1700;
        request.zip_code = Some("ABCDE".into());

        let resp = estate.api().create_property(request);
        assert_eq!(resp.status_code, 400);
        let errors = resp.errors.unwrap();
        assert!(errors.contains(&"Price must be greater than 0".to_string()));
        assert!(errors.contains(&"Year must be between 1800 and 2030".to_string()));
        assert!(errors.contains(&"Invalid ZIP code format".to_string()));
    });
}

#[test]
fn display_order_is_capped_and_auto_order_follows_the_last() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        let id = scenarios::listing(estate, &owner, "P1", 250_000).property.id();
        let images = estate.images();

        let err = images
            .add_image(AddImage::new(id, "a.jpg").at(u32::MAX))
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("Display order cannot exceed 10000"));
        assert!(images.all_images(id).is_empty());

        images.add_image(AddImage::new(id, "a.jpg").at(10_000)).unwrap();
        let next = images.add_image(AddImage::new(id, "b.jpg")).unwrap();
        assert_eq!(next.display_order, 10_001);

        let update = UpdateImage {
            display_order: Some(u32::MAX),
            ..UpdateImage::default()
        };
        assert_eq!(images.update_image(next.id(), update).unwrap_err().status_code(), 400);
    });
}

#[test]
fn location_lookup_matches_city_part_and_exact_state() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        let service = estate.properties();
        for (code, name, city, state) in [
            ("M2", "Palm House", "Miami Beach", "FL"),
            ("M1", "Bay House", "Miami", "FL"),
            ("M3", "Desert House", "Miami", "AZ"),
            ("A1", "Hill House", "Austin", "TX"),
        ] {
            let mut request = scenarios::property_request(&owner, code, 200_000);
            request.name = name.into();
            request.city = Some(city.into());
            request.state = Some(state.into());
            service.create_property(request).unwrap();
        }

        let names = |rows: Vec<realty_core::PropertySummary>| {
            rows.into_iter().map(|r| r.property.name).collect::<Vec<_>>()
        };
        assert_eq!(
            names(service.properties_by_location("miami", None)),
            ["Bay House", "Desert House", "Palm House"]
        );
        assert_eq!(
            names(service.properties_by_location("Miami", Some("fl"))),
            ["Bay House", "Palm House"]
        );
        assert_eq!(names(service.properties_by_location("Miami", Some("  "))).len(), 3);
        assert!(service.properties_by_location("Boston", None).is_empty());
    });
}

#[test]
fn average_price_rounds_to_the_cent() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        let service = estate.properties();
        assert_eq!(service.average_price_by_type(PropertyType::Condo), None);

        for (code, price) in [("C1", dec!(100000.01)), ("C2", dec!(100000.02))] {
            let mut request = scenarios::property_request(&owner, code, 1);
            request.property_type = PropertyType::Condo;
            request.price = price;
            service.create_property(request).unwrap();
        }
        scenarios::listing(estate, &owner, "H1", 900_000);
        assert_eq!(
            service.average_price_by_type(PropertyType::Condo),
            Some(dec!(100000.02))
        );

        let mut sold = scenarios::property_request(&owner, "C3", 1);
        sold.property_type = PropertyType::Condo;
        let sold = service.create_property(sold).unwrap().property.id();
        let update = UpdateProperty {
            status: Some(PropertyStatus::Sold),
            ..UpdateProperty::default()
        };
        service.update_property(sold, update).unwrap();
        assert_eq!(
            service.average_price_by_type(PropertyType::Condo),
            Some(dec!(100000.02))
        );
        assert_eq!(service.average_price_by_type(PropertyType::House), Some(dec!(900000)));
    });
}

#[test]
fn last_trace_is_the_newest_event() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        let id = scenarios::listing(estate, &owner, "P1", 250_000).property.id();
        let service = estate.properties();

        let first = service.last_trace(id).unwrap().unwrap();
        assert_eq!(first.name, "Property Listed");

        service.change_price(id, ChangePrice::to(dec!(260000))).unwrap();
        let latest = service.last_trace(id).unwrap().unwrap();
        assert_eq!(latest.name, "Price Change");
        assert_eq!(latest.value, dec!(260000));

        service.delete_property(id).unwrap();
        assert_eq!(service.last_trace(id).unwrap_err().status_code(), 404);
    });
}

#[test]
fn trace_window_is_inclusive_and_newest_first() {
    with_estate(|estate| {
        let owner = scenarios::owner(estate, "Ada");
        let id = scenarios::listing(estate, &owner, "P1", 250_000).property.id();
        let service = estate.properties();
        service.change_price(id, ChangePrice::to(dec!(260000))).unwrap();
        service.change_price(id, ChangePrice::to(dec!(270000))).unwrap();

        let history = service.property_history(id).unwrap();
        assert_eq!(history.len(), 3);
        let (newest, middle, listed) = (&history[0], &history[1], &history[2]);

        let window = service
            .traces_between(id, middle.event_date, newest.event_date)
            .unwrap();
        let values: Vec<_> = window.iter().map(|t| t.value).collect();
        assert_eq!(values, [dec!(270000), dec!(260000)]);

        let exact = service
            .traces_between(id, listed.event_date, listed.event_date)
            .unwrap();
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].name, "Property Listed");

        let empty = service
            .traces_between(id, newest.event_date, listed.event_date)
            .unwrap();
        assert!(empty.is_empty());
    });
}
