//! Seed command implementation.
//!
//! The seed file names each owner with a `key` that properties refer
//! to through `owner`:
//!
//! ```json
//! {
//!   "owners": [{ "key": "ada", "name": "Ada", "address": "1 Way" }],
//!   "properties": [{ "owner": "ada", "name": "Loft", "address": "5 Mill St",
//!                    "price": "320000", "codeInternal": "L5", "year": 2015 }]
//! }
//! ```

use realty_core::{CreateOwner, CreateProperty, Estate};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Parsed seed file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedFile {
    /// Owners to register.
    pub owners: Vec<SeedOwner>,
    /// Properties to list.
    pub properties: Vec<SeedProperty>,
}

/// Owner entry of a seed file.
#[derive(Debug, Deserialize)]
pub struct SeedOwner {
    /// Name properties use to refer to this owner.
    pub key: String,
    /// Owner fields.
    #[serde(flatten)]
    pub owner: CreateOwner,
}

/// Property entry of a seed file.
#[derive(Debug, Deserialize)]
pub struct SeedProperty {
    /// Key of the owning [`SeedOwner`].
    pub owner: String,
    /// Property fields; `ownerId` is ignored.
    #[serde(flatten)]
    pub property: CreateProperty,
}

/// What a seed run created.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Owners created.
    pub owners: usize,
    /// Properties created.
    pub properties: usize,
}

/// Runs the seed command.
pub fn run(estate: &Estate, file: &Path) -> Result<SeedReport, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(file)?;
    let seed: SeedFile = serde_json::from_str(&text)?;
    load(estate, seed)
}

/// Creates every owner, then every property, through the services.
pub fn load(estate: &Estate, seed: SeedFile) -> Result<SeedReport, Box<dyn std::error::Error>> {
    let mut report = SeedReport::default();
    let mut owners = HashMap::new();

    for entry in seed.owners {
        let owner = estate.owners().create_owner(entry.owner)?;
        owners.insert(entry.key, owner.id());
        report.owners += 1;
    }

    for entry in seed.properties {
        let owner_id = *owners
            .get(&entry.owner)
            .ok_or_else(|| format!("Unknown owner key '{}'", entry.owner))?;
        let mut request = entry.property;
        request.owner_id = owner_id;
        let details = estate.properties().create_property(request)?;
        info!(code = %details.property.code_internal, "seeded property");
        report.properties += 1;
    }

    Ok(report)
}
