use crate::model::{ListingType, Property, PropertyCondition, PropertyStatus, PropertyType};
use crate::query::{SortDirection, SortKey};
use crate::repository::contains_ci;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Criteria for a property search.
///
/// Every supplied criterion must hold. Blank strings count as not supplied,
/// and a range or text criterion never matches a property that lacks the
/// field.
///
/// Deserialization is lenient about sorting: `sortBy` and `sortDirection`
/// are free strings, and an unrecognised `sortBy` selects newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "FilterWire")]
pub struct PropertyFilter {
    /// 1-based page; 0 is read as 1.
    pub page_number: u32,
    /// Items per page; 0 yields an empty page.
    pub page_size: u32,
    /// Matched against name, address, description, city, neighborhood and code.
    pub search_term: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
    /// Inclusive lower bedroom bound.
    pub min_bedrooms: Option<u32>,
    /// Inclusive upper bedroom bound.
    pub max_bedrooms: Option<u32>,
    /// Inclusive lower bathroom bound.
    pub min_bathrooms: Option<u32>,
    /// Inclusive upper bathroom bound.
    pub max_bathrooms: Option<u32>,
    /// Inclusive lower area bound.
    pub min_square_feet: Option<Decimal>,
    /// Inclusive upper area bound.
    pub max_square_feet: Option<Decimal>,
    /// Inclusive lower year bound.
    pub min_year: Option<i32>,
    /// Inclusive upper year bound.
    pub max_year: Option<i32>,
    /// Exact property type.
    pub property_type: Option<PropertyType>,
    /// Exact status.
    pub status: Option<PropertyStatus>,
    /// Exact listing type.
    pub listing_type: Option<ListingType>,
    /// Exact condition.
    pub condition: Option<PropertyCondition>,
    /// City substring.
    pub city: Option<String>,
    /// State substring.
    pub state: Option<String>,
    /// Postal code substring.
    pub zip_code: Option<String>,
    /// Neighborhood substring.
    pub neighborhood: Option<String>,
    /// Pool flag.
    pub has_pool: Option<bool>,
    /// Garden flag.
    pub has_garden: Option<bool>,
    /// Garage flag.
    pub has_garage: Option<bool>,
    /// Fireplace flag.
    pub has_fireplace: Option<bool>,
    /// Air conditioning flag.
    pub has_air_conditioning: Option<bool>,
    /// Heating flag.
    pub has_heating: Option<bool>,
    /// Furnished flag.
    pub is_furnished: Option<bool>,
    /// Pets flag.
    pub pets_allowed: Option<bool>,
    /// Sort column.
    pub sort_by: SortKey,
    /// Sort direction.
    pub sort_direction: SortDirection,
}

impl Default for PropertyFilter {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: 10,
            search_term: None,
            min_price: None,
            max_price: None,
            min_bedrooms: None,
            max_bedrooms: None,
            min_bathrooms: None,
            max_bathrooms: None,
            min_square_feet: None,
            max_square_feet: None,
            min_year: None,
            max_year: None,
            property_type: None,
            status: None,
            listing_type: None,
            condition: None,
            city: None,
            state: None,
            zip_code: None,
            neighborhood: None,
            has_pool: None,
            has_garden: None,
            has_garage: None,
            has_fireplace: None,
            has_air_conditioning: None,
            has_heating: None,
            is_furnished: None,
            pets_allowed: None,
            sort_by: SortKey::CreatedAt,
            sort_direction: SortDirection::Descending,
        }
    }
}

/// Wire shape of [`PropertyFilter`] with sorting left as raw text.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FilterWire {
    page_number: Option<u32>,
    page_size: Option<u32>,
    search_term: Option<String>,
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
    min_bedrooms: Option<u32>,
    max_bedrooms: Option<u32>,
    min_bathrooms: Option<u32>,
    max_bathrooms: Option<u32>,
    min_square_feet: Option<Decimal>,
    max_square_feet: Option<Decimal>,
    min_year: Option<i32>,
    max_year: Option<i32>,
    property_type: Option<PropertyType>,
    status: Option<PropertyStatus>,
    listing_type: Option<ListingType>,
    condition: Option<PropertyCondition>,
    city: Option<String>,
    state: Option<String>,
    zip_code: Option<String>,
    neighborhood: Option<String>,
    has_pool: Option<bool>,
    has_garden: Option<bool>,
    has_garage: Option<bool>,
    has_fireplace: Option<bool>,
    has_air_conditioning: Option<bool>,
    has_heating: Option<bool>,
    is_furnished: Option<bool>,
    pets_allowed: Option<bool>,
    sort_by: Option<String>,
    sort_direction: Option<String>,
}

impl From<FilterWire> for PropertyFilter {
    fn from(wire: FilterWire) -> Self {
        let defaults = Self::default();
        let direction = wire
            .sort_direction
            .as_deref()
            .and_then(SortDirection::parse)
            .unwrap_or(defaults.sort_direction);
        let filter = Self {
            page_number: wire.page_number.unwrap_or(defaults.page_number),
            page_size: wire.page_size.unwrap_or(defaults.page_size),
            search_term: wire.search_term,
            min_price: wire.min_price,
            max_price: wire.max_price,
            min_bedrooms: wire.min_bedrooms,
            max_bedrooms: wire.max_bedrooms,
            min_bathrooms: wire.min_bathrooms,
            max_bathrooms: wire.max_bathrooms,
            min_square_feet: wire.min_square_feet,
            max_square_feet: wire.max_square_feet,
            min_year: wire.min_year,
            max_year: wire.max_year,
            property_type: wire.property_type,
            status: wire.status,
            listing_type: wire.listing_type,
            condition: wire.condition,
            city: wire.city,
            state: wire.state,
            zip_code: wire.zip_code,
            neighborhood: wire.neighborhood,
            has_pool: wire.has_pool,
            has_garden: wire.has_garden,
            has_garage: wire.has_garage,
            has_fireplace: wire.has_fireplace,
            has_air_conditioning: wire.has_air_conditioning,
            has_heating: wire.has_heating,
            is_furnished: wire.is_furnished,
            pets_allowed: wire.pets_allowed,
            ..defaults
        };
        match wire.sort_by.as_deref().filter(|name| !name.trim().is_empty()) {
            Some(name) => filter.sort_by_name(name, direction),
            None => filter.sort(SortKey::CreatedAt, direction),
        }
    }
}

impl PropertyFilter {
    /// A filter matching every active property, first page of 10, newest first.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets page number and size.
    #[must_use]
    pub fn page(mut self, number: u32, size: u32) -> Self {
        self.page_number = number;
        self.page_size = size;
        self
    }

    /// Sets the free-text search term.
    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// Sets the inclusive price range.
    #[must_use]
    pub fn price_between(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Sets the inclusive bedroom range.
    #[must_use]
    pub fn bedrooms_between(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_bedrooms = min;
        self.max_bedrooms = max;
        self
    }

    /// Sets the city substring.
    #[must_use]
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Sets the exact property type.
    #[must_use]
    pub fn property_type(mut self, ty: PropertyType) -> Self {
        self.property_type = Some(ty);
        self
    }

    /// Sets the exact status.
    #[must_use]
    pub fn status(mut self, status: PropertyStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the pool flag.
    #[must_use]
    pub fn has_pool(mut self, value: bool) -> Self {
        self.has_pool = Some(value);
        self
    }

    /// Sorts by a typed key.
    #[must_use]
    pub fn sort(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort_by = key;
        self.sort_direction = direction;
        self
    }

    /// Sorts by a caller-supplied key name.
    ///
    /// Unknown names fall back to newest first instead of failing.
    #[must_use]
    pub fn sort_by_name(self, name: &str, direction: SortDirection) -> Self {
        match SortKey::parse(name) {
            Some(key) => self.sort(key, direction),
            None => {
                debug!(sort_by = name, "unknown sort key, using createdAt descending");
                self.sort(SortKey::CreatedAt, SortDirection::Descending)
            }
        }
    }

    /// Whether an active property satisfies every supplied criterion.
    #[must_use]
    pub fn matches(&self, p: &Property) -> bool {
        self.matches_text(p)
            && self.matches_ranges(p)
            && self.matches_categories(p)
            && self.matches_location(p)
            && self.matches_amenities(p)
    }

    fn matches_text(&self, p: &Property) -> bool {
        let Some(term) = non_blank(&self.search_term) else {
            return true;
        };
        [
            Some(p.name.as_str()),
            Some(p.address.as_str()),
            p.description.as_deref(),
            p.city.as_deref(),
            p.neighborhood.as_deref(),
            Some(p.code_internal.as_str()),
        ]
        .into_iter()
        .flatten()
        .any(|field| contains_ci(field, term))
    }

    fn matches_ranges(&self, p: &Property) -> bool {
        within(Some(p.price), self.min_price, self.max_price)
            && within(p.bedrooms, self.min_bedrooms, self.max_bedrooms)
            && within(p.bathrooms, self.min_bathrooms, self.max_bathrooms)
            && within(p.square_feet, self.min_square_feet, self.max_square_feet)
            && within(Some(p.year), self.min_year, self.max_year)
    }

    fn matches_categories(&self, p: &Property) -> bool {
        equals(self.property_type, p.property_type)
            && equals(self.status, p.status)
            && equals(self.listing_type, p.listing_type)
            && equals(self.condition, p.condition)
    }

    fn matches_location(&self, p: &Property) -> bool {
        substring(&self.city, &p.city)
            && substring(&self.state, &p.state)
            && substring(&self.zip_code, &p.zip_code)
            && substring(&self.neighborhood, &p.neighborhood)
    }

    fn matches_amenities(&self, p: &Property) -> bool {
        equals(self.has_pool, p.has_pool)
            && equals(self.has_garden, p.has_garden)
            && equals(self.has_garage, p.has_garage)
            && equals(self.has_fireplace, p.has_fireplace)
            && equals(self.has_air_conditioning, p.has_air_conditioning)
            && equals(self.has_heating, p.has_heating)
            && equals(self.is_furnished, p.is_furnished)
            && equals(self.pets_allowed, p.pets_allowed)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn within<T: PartialOrd>(value: Option<T>, min: Option<T>, max: Option<T>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let Some(value) = value else {
        return false;
    };
    min.map_or(true, |m| value >= m) && max.map_or(true, |m| value <= m)
}

fn equals<T: PartialEq>(wanted: Option<T>, actual: T) -> bool {
    wanted.map_or(true, |w| w == actual)
}

fn substring(wanted: &Option<String>, actual: &Option<String>) -> bool {
    match non_blank(wanted) {
        None => true,
        Some(w) => actual.as_deref().is_some_and(|a| contains_ci(a, w)),
    }
}
