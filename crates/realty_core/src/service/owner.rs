use crate::dto::{present, CreateOwner};
use crate::entity::{AuditInfo, EntityId};
use crate::error::{CoreError, CoreResult};
use crate::estate::Estate;
use crate::model::Owner;
use crate::repository::{OwnerRepository, PropertyRepository};
use crate::types::EntityKind;
use crate::validation;
use tracing::{info, warn};

const DEFAULT_COUNTRY: &str = "USA";

/// Owner registration and lookup.
#[derive(Debug, Clone)]
pub struct OwnerService {
    estate: Estate,
}

fn owner_not_found(id: EntityId) -> CoreError {
    warn!(owner_id = %id, "owner not found");
    CoreError::not_found(EntityKind::Owner, "Owner not found")
}

impl OwnerService {
    pub(crate) fn new(estate: Estate) -> Self {
        Self { estate }
    }

    /// Registers an owner. Email (ignoring case) and identity document must
    /// be unique among active owners.
    pub fn create_owner(&self, request: CreateOwner) -> CoreResult<Owner> {
        validation::create_owner(&request)?;

        let owner = self.estate.write(|tx| {
            if let Some(email) = present(&request.email) {
                if tx.owner_by_email(email).is_some() {
                    warn!(email, "owner email already exists");
                    return Err(CoreError::conflict("Owner email already exists"));
                }
            }
            if let (Some(ty), Some(number)) = (
                present(&request.document_type),
                present(&request.document_number),
            ) {
                if tx.owner_by_document(ty, number).is_some() {
                    warn!(document_type = ty, "owner document already exists");
                    return Err(CoreError::conflict("Owner document already exists"));
                }
            }

            let text = |v: &Option<String>| present(v).map(str::to_string);
            let owner = Owner {
                audit: AuditInfo::new(),
                name: request.name.trim().to_string(),
                address: request.address.trim().to_string(),
                photo: text(&request.photo),
                birthday: request.birthday,
                phone: text(&request.phone),
                email: text(&request.email),
                document_type: text(&request.document_type),
                document_number: text(&request.document_number),
                city: text(&request.city),
                state: text(&request.state),
                zip_code: text(&request.zip_code),
                country: text(&request.country).or_else(|| Some(DEFAULT_COUNTRY.to_string())),
            };
            tx.put(owner.clone())?;
            Ok(owner)
        })?;

        info!(owner_id = %owner.id(), "owner created");
        Ok(owner)
    }

    /// Active owner by id.
    pub fn get_owner(&self, id: EntityId) -> CoreResult<Owner> {
        self.estate
            .read()
            .active_owner(id)
            .ok_or_else(|| owner_not_found(id))
    }

    /// Active owners whose name contains `name`, ignoring case.
    #[must_use]
    pub fn search_owners(&self, name: &str) -> Vec<Owner> {
        self.estate.read().owners_named(name)
    }

    /// Soft deletes an owner that no longer has active properties.
    pub fn delete_owner(&self, id: EntityId) -> CoreResult<()> {
        self.estate.write(|tx| {
            let mut owner = tx.active_owner(id).ok_or_else(|| owner_not_found(id))?;
            let listed = tx.properties_by_owner(id).len();
            if listed > 0 {
                warn!(owner_id = %id, listed, "owner still has active properties");
                return Err(CoreError::business_rule("Owner has active properties"));
            }
            owner.audit.deactivate();
            tx.put(owner)
        })?;
        info!(owner_id = %id, "owner deleted");
        Ok(())
    }
}
