//! Storage fault injection.
//!
//! [`FlakyBackend`] stores bytes in memory like
//! [`InMemoryBackend`] but fails appends, flushes or syncs while its
//! [`FaultSwitch`] says so. The switch and the stored bytes stay
//! reachable after the backend has been handed to an estate.

use parking_lot::Mutex;
use realty_storage::{InMemoryBackend, StorageBackend, StorageError, StorageResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Faults {
    append: AtomicBool,
    flush: AtomicBool,
}

/// Controls the failures of a [`FlakyBackend`].
#[derive(Debug, Clone)]
pub struct FaultSwitch {
    faults: Arc<Faults>,
    store: Arc<Mutex<InMemoryBackend>>,
}

impl FaultSwitch {
    /// Makes every append fail while `on`.
    pub fn fail_appends(&self, on: bool) {
        self.faults.append.store(on, Ordering::SeqCst);
    }

    /// Makes flush and sync fail while `on`. Appends still land.
    pub fn fail_flushes(&self, on: bool) {
        self.faults.flush.store(on, Ordering::SeqCst);
    }

    /// Clears every fault.
    pub fn heal(&self) {
        self.fail_appends(false);
        self.fail_flushes(false);
    }

    /// Copy of the bytes currently stored.
    pub fn bytes(&self) -> Vec<u8> {
        self.store.lock().data()
    }
}

/// In-memory backend with switchable write failures.
#[derive(Debug)]
pub struct FlakyBackend {
    switch: FaultSwitch,
}

impl FlakyBackend {
    /// Creates an empty backend and the switch controlling it.
    pub fn new() -> (Self, FaultSwitch) {
        Self::with_data(Vec::new())
    }

    /// Creates a backend preloaded with `data`.
    pub fn with_data(data: Vec<u8>) -> (Self, FaultSwitch) {
        let switch = FaultSwitch {
            faults: Arc::new(Faults::default()),
            store: Arc::new(Mutex::new(InMemoryBackend::with_data(data))),
        };
        (
            Self {
                switch: switch.clone(),
            },
            switch,
        )
    }

    fn injected(what: &str) -> StorageError {
        StorageError::Io(std::io::Error::other(format!("injected {what} failure")))
    }
}

impl StorageBackend for FlakyBackend {
    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>> {
        self.switch.store.lock().read_at(offset, len)
    }

    fn append(&mut self, data: &[u8]) -> StorageResult<u64> {
        if self.switch.faults.append.load(Ordering::SeqCst) {
            return Err(Self::injected("append"));
        }
        self.switch.store.lock().append(data)
    }

    fn flush(&mut self) -> StorageResult<()> {
        if self.switch.faults.flush.load(Ordering::SeqCst) {
            return Err(Self::injected("flush"));
        }
        self.switch.store.lock().flush()
    }

    fn sync(&mut self) -> StorageResult<()> {
        if self.switch.faults.flush.load(Ordering::SeqCst) {
            return Err(Self::injected("sync"));
        }
        self.switch.store.lock().sync()
    }

    fn size(&self) -> StorageResult<u64> {
        self.switch.store.lock().size()
    }

    fn truncate(&mut self, new_size: u64) -> StorageResult<()> {
        self.switch.store.lock().truncate(new_size)
    }

    fn describe(&self) -> String {
        "flaky-memory".to_string()
    }
}
