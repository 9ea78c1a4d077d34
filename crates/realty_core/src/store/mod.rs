//! Transactional entity store.
//!
//! Committed entities live in in-memory tables rebuilt from the journal.
//! Writers stage changes on a [`WriteTransaction`] that holds the single
//! writer lock; readers take a [`Snapshot`] of committed state. Both
//! implement [`EntityView`], which the repository traits build on.

mod manager;
mod record;
mod tables;
mod transaction;
mod view;

pub(crate) use manager::TransactionManager;
pub use record::{Record, StoredEntity};
pub use tables::Tables;
pub use transaction::{PendingWrite, Transaction, TransactionState, WriteTransaction};
pub use view::{EntityView, Snapshot};
