//! CLI command implementations.

pub mod history;
pub mod inspect;
pub mod search;
pub mod seed;
