//! # Realty Storage
//!
//! Byte stores that hold the Realty listing journal.
//!
//! Backends know nothing about listings, owners or traces. They hand out
//! offsets for appended bytes, read them back, and make them durable on
//! `flush`/`sync`. `realty_core` owns the journal framing on top.
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - ephemeral stores and tests
//! - [`FileBackend`] - a single journal file on disk
//!
//! ## Example
//!
//! ```rust
//! use realty_storage::{InMemoryBackend, StorageBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! let offset = backend.append(b"listing").unwrap();
//! assert_eq!(backend.read_at(offset, 7).unwrap(), b"listing");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;
