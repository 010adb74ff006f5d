use std::sync::Arc;

use crate::domain::pet::model::{NewPet, Pet, PetChanges, PetCreateReceive, PetPatchReceive};
use crate::domain::pet::repository::PetRepository;
use crate::utils::{dates::parse_date, errors::ApiError, fields::trimmed, id::is_valid_id};

pub(crate) fn invalid_pet_id() -> ApiError {
    ApiError::InvalidId("Invalid petId".to_string())
}

fn pet_not_found() -> ApiError {
    ApiError::NotFound("Pet not found".to_string())
}

#[derive(Clone)]
pub struct PetService {
    repo: Arc<dyn PetRepository>,
}

impl PetService {
    pub fn new(repo: Arc<dyn PetRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Pet>, ApiError> {
        self.repo.find_all().await
    }

    pub async fn get(&self, id: &str) -> Result<Pet, ApiError> {
        if !is_valid_id(id) {
            return Err(invalid_pet_id());
        }

        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(pet_not_found)
    }

    pub async fn create(&self, input: PetCreateReceive) -> Result<Pet, ApiError> {
        let (name, kind) = match (trimmed(input.name), trimmed(input.kind)) {
            (Some(name), Some(kind)) => (name, kind),
            _ => return Err(ApiError::ValidationError("Fields 'name' and 'type' are required".to_string())),
        };

        // `null` counts as absent; anything else must be a real date.
        let birth_date = match input.birth_date.filter(|value| !value.is_null()) {
            Some(value) => Some(parse_date(&value).ok_or_else(|| {
                ApiError::ValidationError("'birthDate' must be a valid date".to_string())
            })?),
            None => None,
        };

        let pet = NewPet {
            name,
            kind,
            breed: trimmed(input.breed),
            birth_date,
        };

        self.repo.insert(pet).await
    }

    /// Applies the whitelisted fields of `patch`. An unparseable
    /// `birthDate` is dropped without failing the rest of the patch.
    pub async fn update(&self, id: &str, patch: PetPatchReceive) -> Result<Pet, ApiError> {
        if !is_valid_id(id) {
            return Err(invalid_pet_id());
        }

        let changes = Self::changes_from_patch(patch)?;

        self.repo
            .update(id, changes)
            .await?
            .ok_or_else(pet_not_found)
    }

    /// Removes the pet and returns its id. Reminders pointing at it are kept.
    pub async fn delete(&self, id: &str) -> Result<String, ApiError> {
        if !is_valid_id(id) {
            return Err(invalid_pet_id());
        }

        self.repo
            .delete(id)
            .await?
            .map(|pet| pet.id)
            .ok_or_else(pet_not_found)
    }

    fn changes_from_patch(patch: PetPatchReceive) -> Result<PetChanges, ApiError> {
        let name = match patch.name {
            Some(name) => Some(trimmed(Some(name)).ok_or_else(|| {
                ApiError::ValidationError("'name' cannot be empty".to_string())
            })?),
            None => None,
        };

        let kind = match patch.kind {
            Some(kind) => Some(trimmed(Some(kind)).ok_or_else(|| {
                ApiError::ValidationError("'type' cannot be empty".to_string())
            })?),
            None => None,
        };

        let birth_date = match patch.birth_date {
            Some(None) => Some(None),
            Some(Some(value)) => parse_date(&value).map(Some),
            None => None,
        };

        Ok(PetChanges {
            name,
            kind,
            breed: patch.breed.map(trimmed),
            birth_date,
        })
    }
}
