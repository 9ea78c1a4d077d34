//! Closed vocabularies used by property records.
//!
//! Each enum serialises by variant name, parses case-insensitively from
//! either its name or its numeric code, and displays a human label.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! listing_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in code order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// Stable numeric code.
            #[must_use]
            pub const fn code(self) -> u8 {
                match self {
                    $( $name::$variant => $code ),+
                }
            }

            /// Display label.
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = normalize(s);
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| {
                        normalize(&format!("{v:?}")) == wanted || v.code().to_string() == wanted
                    })
                    .ok_or_else(|| {
                        CoreError::validation(vec![format!("Invalid {} '{}'", $what, s.trim())])
                    })
            }
        }
    };
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

listing_enum! {
    /// Kind of building or lot.
    PropertyType, "property type" {
        #[default]
        House = 1 => "House",
        Apartment = 2 => "Apartment",
        Condo = 3 => "Condo",
        Townhouse = 4 => "Townhouse",
        Villa = 5 => "Villa",
        Commercial = 6 => "Commercial",
        Land = 7 => "Land",
        Industrial = 8 => "Industrial",
    }
}

listing_enum! {
    /// Market status of a listing.
    PropertyStatus, "property status" {
        #[default]
        Available = 1 => "Available",
        Sold = 2 => "Sold",
        UnderContract = 3 => "Under Contract",
        Rented = 4 => "Rented",
        OffMarket = 5 => "Off Market",
    }
}

listing_enum! {
    /// Whether a property is offered for sale, rent or both.
    ListingType, "listing type" {
        #[default]
        Sale = 1 => "Sale",
        Rent = 2 => "Rent",
        Both = 3 => "Sale or Rent",
    }
}

listing_enum! {
    /// Physical condition of the property.
    PropertyCondition, "property condition" {
        New = 1 => "New",
        Excellent = 2 => "Excellent",
        #[default]
        Good = 3 => "Good",
        Fair = 4 => "Fair",
        Poor = 5 => "Poor",
        NeedsRenovation = 6 => "Needs Renovation",
    }
}
