//! The estate handle.

use crate::api::ListingApi;
use crate::config::Config;
use crate::error::CoreResult;
use crate::journal::{Journal, JournalStats};
use crate::service::{ImageService, OwnerService, PropertyService};
use crate::store::{Snapshot, TransactionManager, WriteTransaction};
use crate::types::{EntityKind, SequenceNumber};
use realty_storage::{FileBackend, InMemoryBackend, StorageBackend};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Handle to a listing store.
///
/// `Estate` is cheap to clone and safe to share across threads; clones
/// refer to the same store.
///
/// # Opening an estate
///
/// ```rust,ignore
/// use realty_core::{Config, Estate};
///
/// let estate = Estate::open("data/listings", Config::default())?;
/// let page = estate.properties().search(&Default::default());
/// ```
///
/// For tests, use [`Estate::open_in_memory`].
///
/// # Units of work
///
/// [`Estate::write`] runs a closure on a [`WriteTransaction`] holding the
/// single-writer lock. Returning `Ok` journals and publishes every staged
/// write at once; returning `Err` discards them.
#[derive(Clone)]
pub struct Estate {
    inner: Arc<EstateInner>,
}

struct EstateInner {
    config: Config,
    manager: TransactionManager,
}

/// Row counts and journal summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstateStats {
    /// Journal summary.
    pub journal: JournalStats,
    /// Owners, active or not.
    pub owners: usize,
    /// Properties, active or not.
    pub properties: usize,
    /// Images.
    pub images: usize,
    /// Traces.
    pub traces: usize,
    /// Last published commit.
    pub committed_sequence: u64,
}

impl Estate {
    /// Opens (or creates) the estate stored in directory `dir`.
    pub fn open(dir: impl AsRef<Path>, config: Config) -> CoreResult<Self> {
        let path = dir.as_ref().join(&config.journal_file_name);
        let backend = FileBackend::open_with_create_dirs(&path)?;
        Self::open_with_backend(config, Box::new(backend))
    }

    /// Opens an empty estate held in memory.
    pub fn open_in_memory() -> CoreResult<Self> {
        Self::open_with_backend(
            Config::default().sync_on_commit(false),
            Box::new(InMemoryBackend::new()),
        )
    }

    /// Opens an estate over any backend, replaying its journal.
    pub fn open_with_backend(config: Config, backend: Box<dyn StorageBackend>) -> CoreResult<Self> {
        let journal = Journal::new(backend, config.sync_on_commit);
        let manager = TransactionManager::open(journal)?;
        info!(
            backend = %manager.describe(),
            sequence = manager.committed_seq().as_u64(),
            "estate opened"
        );
        Ok(Self {
            inner: Arc::new(EstateInner { config, manager }),
        })
    }

    /// Configuration the estate was opened with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Consistent view of committed state.
    #[must_use]
    pub fn read(&self) -> Snapshot<'_> {
        self.inner.manager.snapshot()
    }

    /// Runs `f` as one atomic unit of work.
    pub fn write<F, T>(&self, f: F) -> CoreResult<T>
    where
        F: FnOnce(&mut WriteTransaction<'_>) -> CoreResult<T>,
    {
        self.inner.manager.write(f)
    }

    /// Sequence of the last published commit.
    #[must_use]
    pub fn committed_sequence(&self) -> SequenceNumber {
        self.inner.manager.committed_seq()
    }

    /// Property operations.
    #[must_use]
    pub fn properties(&self) -> PropertyService {
        PropertyService::new(self.clone())
    }

    /// Image operations.
    #[must_use]
    pub fn images(&self) -> ImageService {
        ImageService::new(self.clone())
    }

    /// Owner operations.
    #[must_use]
    pub fn owners(&self) -> OwnerService {
        OwnerService::new(self.clone())
    }

    /// Envelope-returning facade over every service.
    #[must_use]
    pub fn api(&self) -> ListingApi {
        ListingApi::new(self.clone())
    }

    /// Row counts and a journal scan.
    pub fn stats(&self) -> CoreResult<EstateStats> {
        let journal = self.inner.manager.journal_stats()?;
        let snapshot = self.read();
        Ok(EstateStats {
            journal,
            owners: snapshot.count(EntityKind::Owner),
            properties: snapshot.count(EntityKind::Property),
            images: snapshot.count(EntityKind::Image),
            traces: snapshot.count(EntityKind::Trace),
            committed_sequence: snapshot.sequence().as_u64(),
        })
    }
}

impl std::fmt::Debug for Estate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Estate")
            .field("config", &self.inner.config)
            .field("manager", &self.inner.manager)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn estate_is_shareable() {
        assert_send_sync::<Estate>();
    }

    #[test]
    fn in_memory_starts_empty() {
        let estate = Estate::open_in_memory().unwrap();
        let stats = estate.stats().unwrap();
        assert_eq!(stats.properties, 0);
        assert_eq!(stats.journal.records, 0);
        assert_eq!(estate.committed_sequence(), SequenceNumber::new(0));
    }

    #[test]
    fn file_estate_creates_journal() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default().journal_file_name("j.log");
        let _estate = Estate::open(dir.path().join("nested"), config).unwrap();
        assert!(dir.path().join("nested").join("j.log").exists());
    }
}
