//! Estate fixtures and scenario helpers.

use realty_core::{Config, Estate};
use std::path::Path;
use tempfile::TempDir;

/// A test estate with automatic cleanup.
pub struct TestEstate {
    /// The estate instance.
    pub estate: Estate,
    config: Config,
    // Kept alive so the journal file outlives the estate.
    temp_dir: Option<TempDir>,
}

impl TestEstate {
    /// Creates a new in-memory test estate.
    pub fn memory() -> Self {
        Self {
            estate: Estate::open_in_memory().expect("Failed to open in-memory estate"),
            config: Config::default().sync_on_commit(false),
            temp_dir: None,
        }
    }

    /// Creates a new estate journaled to a temporary directory.
    pub fn file() -> Self {
        Self::file_with_config(Config::default())
    }

    /// Like [`TestEstate::file`] with an explicit config.
    pub fn file_with_config(config: Config) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let estate =
            Estate::open(temp_dir.path(), config.clone()).expect("Failed to open file estate");
        Self {
            estate,
            config,
            temp_dir: Some(temp_dir),
        }
    }

    /// Directory holding the journal, if file-based.
    pub fn dir(&self) -> Option<&Path> {
        self.temp_dir.as_ref().map(TempDir::path)
    }

    /// Closes the estate and opens it again from its journal.
    ///
    /// # Panics
    ///
    /// Panics for in-memory estates, which have nothing to replay.
    pub fn reopen(self) -> Self {
        let Self {
            estate,
            config,
            temp_dir,
        } = self;
        drop(estate);
        let dir = temp_dir.expect("Only file estates can be reopened");
        let estate = Estate::open(dir.path(), config.clone()).expect("Failed to reopen estate");
        Self {
            estate,
            config,
            temp_dir: Some(dir),
        }
    }
}

impl std::ops::Deref for TestEstate {
    type Target = Estate;

    fn deref(&self) -> &Self::Target {
        &self.estate
    }
}

/// Runs a test against a fresh in-memory estate.
pub fn with_estate<F, R>(f: F) -> R
where
    F: FnOnce(&Estate) -> R,
{
    let test_estate = TestEstate::memory();
    f(&test_estate.estate)
}

/// Runs a test against a fresh file-backed estate.
pub fn with_file_estate<F, R>(f: F) -> R
where
    F: FnOnce(&Estate, &Path) -> R,
{
    let test_estate = TestEstate::file();
    let dir = test_estate.dir().expect("File estate should have a directory");
    f(&test_estate.estate, dir)
}

/// Scenario helpers.
pub mod scenarios {
    use realty_core::{CreateOwner, CreateProperty, Estate, Owner, PropertyDetails};
    use rust_decimal::Decimal;

    /// Registers an owner with the given name.
    pub fn owner(estate: &Estate, name: &str) -> Owner {
        estate
            .owners()
            .create_owner(CreateOwner::new(name, "1 Main Street"))
            .expect("Failed to create owner")
    }

    /// A valid create request with whole-dollar `price`.
    pub fn property_request(owner: &Owner, code: &str, price: i64) -> CreateProperty {
        CreateProperty {
            name: format!("Listing {code}"),
            address: format!("{code} Harbor Road"),
            price: Decimal::new(price, 0),
            code_internal: code.to_string(),
            year: 2005,
            owner_id: owner.id(),
            ..CreateProperty::default()
        }
    }

    /// Lists a property and returns its details.
    pub fn listing(estate: &Estate, owner: &Owner, code: &str, price: i64) -> PropertyDetails {
        estate
            .properties()
            .create_property(property_request(owner, code, price))
            .expect("Failed to create property")
    }

    /// An estate with one owner and `count` listings coded `P0..P{count}`.
    pub fn populated_estate(count: usize) -> (super::TestEstate, Owner) {
        let test_estate = super::TestEstate::memory();
        let owner = owner(&test_estate, "Populated Owner");
        for i in 0..count {
            let price = 100_000 + i64::try_from(i).unwrap_or(0) * 1_000;
            listing(&test_estate, &owner, &format!("P{i}"), price);
        }
        (test_estate, owner)
    }
}
