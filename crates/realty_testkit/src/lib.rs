//! # Realty Testkit
//!
//! Test utilities for Realty.
//!
//! This crate provides:
//! - Estate fixtures, in memory or on a temporary journal file
//! - Sample owners and listings for scenario tests
//! - Property-based test generators using proptest
//! - A storage backend whose writes can be made to fail on demand
//!
//! ## Usage
//!
//! ```rust,ignore
//! use realty_testkit::prelude::*;
//!
//! #[test]
//! fn lists_a_house() {
//!     with_estate(|estate| {
//!         let owner = scenarios::owner(estate, "Ada");
//!         scenarios::listing(estate, &owner, "P1", 250_000);
//!     });
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod faults;
pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::faults::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use faults::*;
pub use fixtures::*;
pub use generators::*;
