//! # Realty Core
//!
//! Listing store and business core for Realty.
//!
//! This crate provides:
//! - A journaled entity store for owners, properties, images and traces
//! - Single-writer transactions that publish entity and trace writes together
//! - Named repository queries per entity, each filtering soft-deleted rows
//! - The property filter/sort/paginate engine
//! - Property mutations that append to an immutable trace history
//! - Image ordering and primary-image selection
//! - A uniform [`ApiResponse`] envelope for callers
//!
//! ## Example
//!
//! ```rust
//! use realty_core::{CreateOwner, CreateProperty, Estate, PropertyFilter};
//! use rust_decimal::Decimal;
//!
//! let estate = Estate::open_in_memory().unwrap();
//! let owner = estate
//!     .owners()
//!     .create_owner(CreateOwner::new("Ada Lovelace", "1 Analytical Way"))
//!     .unwrap();
//!
//! let request = CreateProperty {
//!     name: "House A".into(),
//!     address: "10 Ocean Drive".into(),
//!     price: Decimal::new(250_000, 0),
//!     code_internal: "P1".into(),
//!     year: 2001,
//!     owner_id: owner.id(),
//!     ..CreateProperty::default()
//! };
//! estate.properties().create_property(request).unwrap();
//!
//! let page = estate.properties().search(&PropertyFilter::new());
//! assert_eq!(page.total_count, 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod dto;
mod entity;
mod error;
mod estate;
mod journal;
mod mapping;
mod model;
mod query;
mod repository;
mod response;
mod service;
mod store;
mod types;
mod validation;

pub use api::ListingApi;
pub use config::Config;
pub use dto::{AddImage, ChangePrice, CreateOwner, CreateProperty, UpdateImage, UpdateProperty};
pub use entity::{AuditInfo, EntityId};
pub use error::{CoreError, CoreResult};
pub use estate::{Estate, EstateStats};
pub use journal::{JournalRecord, JournalStats};
pub use mapping::{PropertyDetails, PropertySummary};
pub use model::{
    ListingType, Owner, Property, PropertyCondition, PropertyImage, PropertyStatus, PropertyTrace,
    PropertyType, TransactionKind,
};
pub use query::{PagedResult, PropertyFilter, SortDirection, SortKey};
pub use repository::{ImageRepository, OwnerRepository, PropertyRepository, TraceRepository};
pub use response::ApiResponse;
pub use service::{format_currency, ImageService, OwnerService, PropertyService};
pub use store::{EntityView, Record, Snapshot, StoredEntity, WriteTransaction};
pub use types::{EntityKind, SequenceNumber, TransactionId};

/// Crate version, reported by `realty version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
