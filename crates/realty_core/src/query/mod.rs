//! Property filter, sort and paginate engine.

mod engine;
mod filter;
mod page;
mod sort;

pub(crate) use engine::search;
pub use filter::PropertyFilter;
pub use page::PagedResult;
pub use sort::{SortDirection, SortKey};
