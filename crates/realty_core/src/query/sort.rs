use crate::model::Property;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Column a property search is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Listing name, ignoring case.
    Name,
    /// Asking price.
    Price,
    /// Year built.
    Year,
    /// Creation time.
    #[default]
    CreatedAt,
    /// Last update time; never-updated rows first.
    UpdatedAt,
    /// City, ignoring case.
    City,
    /// Bedroom count.
    Bedrooms,
    /// Bathroom count.
    Bathrooms,
    /// Interior area.
    SquareFeet,
}

impl SortKey {
    /// Every key.
    pub const ALL: &'static [SortKey] = &[
        Self::Name,
        Self::Price,
        Self::Year,
        Self::CreatedAt,
        Self::UpdatedAt,
        Self::City,
        Self::Bedrooms,
        Self::Bathrooms,
        Self::SquareFeet,
    ];

    /// Parses a caller-supplied key name, ignoring case, `_` and `-`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let key: String = name
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        Some(match key.as_str() {
            "name" => Self::Name,
            "price" => Self::Price,
            "year" => Self::Year,
            "createdat" => Self::CreatedAt,
            "updatedat" => Self::UpdatedAt,
            "city" => Self::City,
            "bedrooms" => Self::Bedrooms,
            "bathrooms" => Self::Bathrooms,
            "squarefeet" => Self::SquareFeet,
            _ => return None,
        })
    }

    /// Compares two properties on this key alone. Absent values order first.
    #[must_use]
    pub fn compare(self, a: &Property, b: &Property) -> Ordering {
        match self {
            Self::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            Self::Price => a.price.cmp(&b.price),
            Self::Year => a.year.cmp(&b.year),
            Self::CreatedAt => a.audit.created_at.cmp(&b.audit.created_at),
            Self::UpdatedAt => a.audit.updated_at.cmp(&b.audit.updated_at),
            Self::City => lower(&a.city).cmp(&lower(&b.city)),
            Self::Bedrooms => a.bedrooms.cmp(&b.bedrooms),
            Self::Bathrooms => a.bathrooms.cmp(&b.bathrooms),
            Self::SquareFeet => a.square_feet.cmp(&b.square_feet),
        }
    }
}

fn lower(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::to_lowercase)
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown sort key '{s}'"))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    #[default]
    Descending,
}

impl SortDirection {
    /// Parses `asc`, `ascending`, `desc` or `descending`, ignoring case.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Ascending),
            "desc" | "descending" => Some(Self::Descending),
            _ => None,
        }
    }

    /// Applies the direction to an ascending comparison.
    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_keys() {
        assert_eq!(SortKey::parse("price"), Some(SortKey::Price));
        assert_eq!(SortKey::parse("squareFeet"), Some(SortKey::SquareFeet));
        assert_eq!(SortKey::parse("created_at"), Some(SortKey::CreatedAt));
        assert_eq!(SortKey::parse(" UPDATEDAT "), Some(SortKey::UpdatedAt));
    }

    #[test]
    fn unknown_keys_do_not_parse() {
        assert_eq!(SortKey::parse("color"), None);
        assert!("color".parse::<SortKey>().is_err());
    }

    #[test]
    fn defaults() {
        assert_eq!(SortKey::default(), SortKey::CreatedAt);
        assert_eq!(SortDirection::default(), SortDirection::Descending);
    }

    #[test]
    fn descending_reverses() {
        assert_eq!(SortDirection::Descending.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortDirection::Ascending.apply(Ordering::Less), Ordering::Less);
    }
}
