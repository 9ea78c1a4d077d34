//! Named queries per entity.
//!
//! Each trait is implemented for every [`EntityView`](crate::EntityView), so
//! the same query runs against a snapshot or inside a write transaction.
//! Soft-deleted rows are filtered by each method itself.

mod image;
mod owner;
mod property;
mod trace;

pub use image::ImageRepository;
pub use owner::OwnerRepository;
pub use property::PropertyRepository;
pub use trace::TraceRepository;

pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
