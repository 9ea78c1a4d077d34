use crate::dto::{present, ChangePrice, CreateProperty, UpdateProperty};
use crate::entity::{AuditInfo, EntityId};
use crate::error::{CoreError, CoreResult};
use crate::estate::Estate;
use crate::mapping::{PropertyDetails, PropertySummary};
use crate::model::{Property, PropertyStatus, PropertyTrace, PropertyType, TransactionKind};
use crate::query::{self, PagedResult, PropertyFilter};
use crate::repository::{ImageRepository, OwnerRepository, PropertyRepository, TraceRepository};
use crate::service::format_currency;
use crate::store::{EntityView, WriteTransaction};
use crate::types::EntityKind;
use crate::validation;
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{info, warn};

/// Listing reads and mutations.
///
/// Every mutation that touches the headline fields or the price appends a
/// [`PropertyTrace`] in the same transaction.
#[derive(Debug, Clone)]
pub struct PropertyService {
    estate: Estate,
}

fn property_not_found(id: EntityId) -> CoreError {
    warn!(property_id = %id, "property not found");
    CoreError::not_found(EntityKind::Property, "Property not found")
}

fn load(tx: &WriteTransaction<'_>, id: EntityId) -> CoreResult<Property> {
    tx.active_property(id).ok_or_else(|| property_not_found(id))
}

fn summarize<V: EntityView>(view: &V, property: Property) -> PropertySummary {
    let owner = view.active_owner(property.owner_id);
    let images = view.enabled_images_of(property.id());
    PropertySummary::from_parts(property, owner.as_ref(), &images)
}

fn details<V: EntityView>(view: &V, property: Property) -> PropertyDetails {
    let owner = view.active_owner(property.owner_id);
    let images = view.enabled_images_of(property.id());
    let traces = view.traces_of(property.id());
    PropertyDetails::from_parts(property, owner, images, traces)
}

fn trace_tax(property: &Property) -> Decimal {
    property.property_tax.unwrap_or(Decimal::ZERO)
}

fn owned(value: &Option<String>) -> Option<String> {
    present(value).map(str::to_string)
}

impl PropertyService {
    pub(crate) fn new(estate: Estate) -> Self {
        Self { estate }
    }

    /// Lists a new property together with its "Property Listed" trace.
    pub fn create_property(&self, request: CreateProperty) -> CoreResult<PropertyDetails> {
        validation::create_property(&request)?;

        let property = self.estate.write(|tx| {
            if tx.active_owner(request.owner_id).is_none() {
                warn!(owner_id = %request.owner_id, "owner not found");
                return Err(CoreError::not_found(EntityKind::Owner, "Owner not found"));
            }
            let code = request.code_internal.trim();
            if tx.code_exists(code) {
                warn!(code, "property code already exists");
                return Err(CoreError::business_rule("Property code already exists"));
            }

            let property = new_property(&request);
            let trace = PropertyTrace::record(
                property.id(),
                "Property Listed",
                TransactionKind::Listing,
                property.price,
                trace_tax(&property),
                "Initial property listing",
            );
            tx.put(property.clone())?;
            tx.put(trace)?;
            Ok(property)
        })?;

        info!(property_id = %property.id(), code = %property.code_internal, "property listed");
        Ok(details(&self.estate.read(), property))
    }

    /// Applies a partial update.
    ///
    /// A trace is written only when the name, address or price changed.
    pub fn update_property(&self, id: EntityId, request: UpdateProperty) -> CoreResult<PropertyDetails> {
        validation::update_property(&request)?;

        let (property, changes) = self.estate.write(|tx| {
            let mut property = load(tx, id)?;
            let changes = apply_update(&mut property, &request);
            property.audit.touch();

            if !changes.is_empty() {
                let trace = PropertyTrace::record(
                    id,
                    "Property Updated",
                    TransactionKind::Update,
                    property.price,
                    trace_tax(&property),
                    format!("Property updated. Changes: {}", changes.join(", ")),
                );
                tx.put(trace)?;
            }
            tx.put(property.clone())?;
            Ok((property, changes))
        })?;

        info!(property_id = %id, traced = !changes.is_empty(), "property updated");
        Ok(details(&self.estate.read(), property))
    }

    /// Sets a new price and always records a "Price Change" trace, even
    /// when the amount is unchanged.
    pub fn change_price(&self, id: EntityId, request: ChangePrice) -> CoreResult<PropertyDetails> {
        validation::change_price(&request)?;

        let (property, old_price) = self.estate.write(|tx| {
            let mut property = load(tx, id)?;
            let old_price = property.price;
            property.price = request.new_price;
            property.audit.touch();

            let mut description = format!(
                "Price changed from {} to {}.",
                format_currency(old_price),
                format_currency(request.new_price)
            );
            if let Some(reason) = present(&request.reason) {
                description.push_str(" Reason: ");
                description.push_str(reason);
            }

            let trace = PropertyTrace::record(
                id,
                "Price Change",
                TransactionKind::PriceChange,
                request.new_price,
                trace_tax(&property),
                description,
            );
            tx.put(trace)?;
            tx.put(property.clone())?;
            Ok((property, old_price))
        })?;

        info!(property_id = %id, %old_price, new_price = %property.price, "price changed");
        Ok(details(&self.estate.read(), property))
    }

    /// Soft deletes a property. History is kept and no trace is written.
    pub fn delete_property(&self, id: EntityId) -> CoreResult<()> {
        self.estate.write(|tx| {
            let mut property = load(tx, id)?;
            property.audit.deactivate();
            tx.put(property)
        })?;
        info!(property_id = %id, "property deleted");
        Ok(())
    }

    /// Full view of an active property.
    pub fn get_property(&self, id: EntityId) -> CoreResult<PropertyDetails> {
        let snapshot = self.estate.read();
        let property = snapshot
            .active_property(id)
            .ok_or_else(|| property_not_found(id))?;
        Ok(details(&snapshot, property))
    }

    /// Full view of the active property carrying `code`.
    pub fn get_by_code(&self, code: &str) -> CoreResult<PropertyDetails> {
        let snapshot = self.estate.read();
        let property = snapshot.property_by_code(code).ok_or_else(|| {
            warn!(code, "property code not found");
            CoreError::not_found(EntityKind::Property, "Property not found")
        })?;
        Ok(details(&snapshot, property))
    }

    /// Filters, sorts and paginates the active properties.
    #[must_use]
    pub fn search(&self, filter: &PropertyFilter) -> PagedResult<PropertySummary> {
        let snapshot = self.estate.read();
        query::search(&snapshot, filter).map(|p| summarize(&snapshot, p))
    }

    /// Active properties of an owner, newest first.
    #[must_use]
    pub fn properties_by_owner(&self, owner_id: EntityId) -> Vec<PropertySummary> {
        let snapshot = self.estate.read();
        snapshot
            .properties_by_owner(owner_id)
            .into_iter()
            .map(|p| summarize(&snapshot, p))
            .collect()
    }

    /// Properties on the market, newest first.
    #[must_use]
    pub fn available_properties(&self) -> Vec<PropertySummary> {
        let snapshot = self.estate.read();
        snapshot
            .available_properties()
            .into_iter()
            .map(|p| summarize(&snapshot, p))
            .collect()
    }

    /// Properties in a city, optionally narrowed to a state.
    #[must_use]
    pub fn properties_by_location(&self, city: &str, state: Option<&str>) -> Vec<PropertySummary> {
        let snapshot = self.estate.read();
        snapshot
            .properties_by_location(city, state)
            .into_iter()
            .map(|p| summarize(&snapshot, p))
            .collect()
    }

    /// Mean price of the available properties of a type, to the cent.
    #[must_use]
    pub fn average_price_by_type(&self, property_type: PropertyType) -> Option<Decimal> {
        let prices: Vec<Decimal> = self
            .estate
            .read()
            .available_properties()
            .into_iter()
            .filter(|p| p.property_type == property_type)
            .map(|p| p.price)
            .collect();
        if prices.is_empty() {
            return None;
        }
        let total: Decimal = prices.iter().sum();
        let mean = total / Decimal::from(prices.len());
        Some(mean.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }

    /// History of an active property, newest first.
    pub fn property_history(&self, id: EntityId) -> CoreResult<Vec<PropertyTrace>> {
        let snapshot = self.estate.read();
        if snapshot.active_property(id).is_none() {
            return Err(property_not_found(id));
        }
        Ok(snapshot.traces_of(id))
    }

    /// Latest trace of an active property.
    pub fn last_trace(&self, id: EntityId) -> CoreResult<Option<PropertyTrace>> {
        let snapshot = self.estate.read();
        if snapshot.active_property(id).is_none() {
            return Err(property_not_found(id));
        }
        Ok(snapshot.last_trace_of(id))
    }

    /// Traces of an active property dated within `[from, to]`, newest first.
    pub fn traces_between(
        &self,
        id: EntityId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> CoreResult<Vec<PropertyTrace>> {
        let snapshot = self.estate.read();
        if snapshot.active_property(id).is_none() {
            return Err(property_not_found(id));
        }
        Ok(snapshot.traces_between(id, from, to))
    }
}

fn new_property(req: &CreateProperty) -> Property {
    let audit = AuditInfo::new();
    Property {
        listed_date: Some(audit.created_at),
        audit,
        name: req.name.trim().to_string(),
        address: req.address.trim().to_string(),
        price: req.price,
        code_internal: req.code_internal.trim().to_string(),
        year: req.year,
        description: owned(&req.description),
        property_type: req.property_type,
        status: PropertyStatus::Available,
        listing_type: req.listing_type,
        condition: req.condition,
        bedrooms: req.bedrooms,
        bathrooms: req.bathrooms,
        half_bathrooms: req.half_bathrooms,
        parking_spaces: req.parking_spaces,
        square_feet: req.square_feet,
        lot_size: req.lot_size,
        city: owned(&req.city),
        state: owned(&req.state),
        zip_code: owned(&req.zip_code),
        neighborhood: owned(&req.neighborhood),
        latitude: req.latitude,
        longitude: req.longitude,
        has_pool: req.has_pool,
        has_garden: req.has_garden,
        has_garage: req.has_garage,
        has_fireplace: req.has_fireplace,
        has_air_conditioning: req.has_air_conditioning,
        has_heating: req.has_heating,
        is_furnished: req.is_furnished,
        pets_allowed: req.pets_allowed,
        monthly_rent: req.monthly_rent,
        property_tax: req.property_tax,
        hoa_fees: req.hoa_fees,
        available_from: req.available_from,
        sold_date: None,
        owner_id: req.owner_id,
    }
}

/// Copies every supplied field onto `p`, returning the traced diffs.
fn apply_update(p: &mut Property, req: &UpdateProperty) -> Vec<String> {
    let mut changes = Vec::new();

    if let Some(name) = present(&req.name) {
        if name != p.name {
            changes.push(format!("Name: {} → {}", p.name, name));
            p.name = name.to_string();
        }
    }
    if let Some(address) = present(&req.address) {
        if address != p.address {
            changes.push(format!("Address: {} → {}", p.address, address));
            p.address = address.to_string();
        }
    }
    if let Some(price) = req.price {
        if price != p.price {
            changes.push(format!(
                "Price: {} → {}",
                format_currency(p.price),
                format_currency(price)
            ));
            p.price = price;
        }
    }

    macro_rules! copy {
        ($($field:ident),+ $(,)?) => {
            $( if let Some(value) = req.$field { p.$field = value; } )+
        };
    }
    macro_rules! copy_some {
        ($($field:ident),+ $(,)?) => {
            $( if let Some(value) = req.$field { p.$field = Some(value); } )+
        };
    }
    macro_rules! copy_text {
        ($($field:ident),+ $(,)?) => {
            $( if let Some(value) = present(&req.$field) { p.$field = Some(value.to_string()); } )+
        };
    }

    copy!(
        year,
        property_type,
        status,
        listing_type,
        condition,
        has_pool,
        has_garden,
        has_garage,
        has_fireplace,
        has_air_conditioning,
        has_heating,
        is_furnished,
        pets_allowed,
    );
    copy_some!(
        bedrooms,
        bathrooms,
        half_bathrooms,
        parking_spaces,
        square_feet,
        lot_size,
        latitude,
        longitude,
        monthly_rent,
        property_tax,
        hoa_fees,
        available_from,
        sold_date,
    );
    copy_text!(description, city, state, zip_code, neighborhood);

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn property() -> Property {
        new_property(&CreateProperty {
            name: "Old Name".into(),
            address: "1 Old St".into(),
            price: dec!(100000),
            code_internal: "C1".into(),
            year: 2000,
            owner_id: EntityId::new(),
            ..CreateProperty::default()
        })
    }

    #[test]
    fn new_property_is_available_and_listed() {
        let p = property();
        assert_eq!(p.status, PropertyStatus::Available);
        assert_eq!(p.listed_date, Some(p.audit.created_at));
        assert!(p.is_active());
    }

    #[test]
    fn diff_covers_headline_fields() {
        let mut p = property();
        let changes = apply_update(
            &mut p,
            &UpdateProperty {
                name: Some("New Name".into()),
                price: Some(dec!(1250000)),
                ..UpdateProperty::default()
            },
        );
        assert_eq!(
            changes,
            vec![
                "Name: Old Name → New Name".to_string(),
                "Price: $100,000.00 → $1,250,000.00".to_string(),
            ]
        );
    }

    #[test]
    fn unchanged_values_are_not_diffs() {
        let mut p = property();
        let changes = apply_update(
            &mut p,
            &UpdateProperty {
                name: Some("Old Name".into()),
                price: Some(dec!(100000.00)),
                bedrooms: Some(4),
                ..UpdateProperty::default()
            },
        );
        assert!(changes.is_empty());
        assert_eq!(p.bedrooms, Some(4));
    }

    #[test]
    fn explicit_false_and_zero_apply() {
        let mut p = property();
        p.has_pool = true;
        p.parking_spaces = Some(2);
        apply_update(
            &mut p,
            &UpdateProperty {
                has_pool: Some(false),
                parking_spaces: Some(0),
                city: Some("  ".into()),
                ..UpdateProperty::default()
            },
        );
        assert!(!p.has_pool);
        assert_eq!(p.parking_spaces, Some(0));
        assert_eq!(p.city, None);
    }
}
