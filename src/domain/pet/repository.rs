use async_trait::async_trait;

use crate::{domain::pet::model::{NewPet, Pet, PetChanges}, utils::errors::ApiError};

/// Storage for pets. Ids passed in have already been checked with
/// [`crate::utils::id::is_valid_id`].
#[async_trait]
pub trait PetRepository: Send + Sync {
    /// All pets, newest first.
    async fn find_all(&self) -> Result<Vec<Pet>, ApiError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Pet>, ApiError>;
    async fn exists(&self, id: &str) -> Result<bool, ApiError>;
    /// Stores the pet under a freshly generated id and stamps both timestamps.
    async fn insert(&self, pet: NewPet) -> Result<Pet, ApiError>;
    /// Returns the updated pet, or `None` when no pet has this id.
    async fn update(&self, id: &str, changes: PetChanges) -> Result<Option<Pet>, ApiError>;
    /// Returns the removed pet, or `None` when no pet has this id.
    async fn delete(&self, id: &str) -> Result<Option<Pet>, ApiError>;
}
