//! Entity identity and audit metadata shared by every record kind.

mod audit;
mod id;

pub use audit::AuditInfo;
pub use id::EntityId;
