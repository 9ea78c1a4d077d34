//! Write-ahead journal of committed transactions.
//!
//! Every commit appends one batch: a `Begin` record, one `Put` or `Delete`
//! per staged write, and a `Commit` record. Replay on open rebuilds the
//! entity tables from the batches that reached their `Commit`.
//!
//! ## Record format
//!
//! ```text
//! | magic "RLTJ" (4) | version u16 (2) | type u8 (1) | length u32 (4) | payload (N) | crc32 (4) |
//! ```
//!
//! Integers are little-endian, the payload is CBOR and the CRC covers
//! everything before it.

mod reader;
mod record;
mod writer;

pub(crate) use reader::JournalReader;
pub use record::JournalRecord;
pub(crate) use record::{compute_crc32, RecordType, HEADER_SIZE, JOURNAL_MAGIC, JOURNAL_VERSION};
pub(crate) use writer::{Journal, Recovery};
pub use writer::JournalStats;
