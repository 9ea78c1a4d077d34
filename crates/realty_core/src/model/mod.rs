//! Stored entity types.

mod enums;
mod image;
mod owner;
mod property;
mod trace;

pub use enums::{ListingType, PropertyCondition, PropertyStatus, PropertyType};
pub use image::PropertyImage;
pub use owner::Owner;
pub use property::Property;
pub use trace::{PropertyTrace, TransactionKind};
