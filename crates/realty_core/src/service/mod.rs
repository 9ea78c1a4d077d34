//! Business operations over the store.
//!
//! Services validate requests, run each mutation as one unit of work and
//! log the outcome. Business failures come back as [`CoreError`] values
//! with caller-facing messages.
//!
//! [`CoreError`]: crate::CoreError

mod format;
mod image;
mod owner;
mod property;

pub use format::format_currency;
pub use image::ImageService;
pub use owner::OwnerService;
pub use property::PropertyService;
