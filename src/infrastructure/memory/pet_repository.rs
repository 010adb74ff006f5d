use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;

use crate::domain::pet::{model::{NewPet, Pet, PetChanges}, repository::PetRepository};
use crate::infrastructure::memory::poisoned;
use crate::utils::errors::ApiError;

#[derive(Default)]
pub struct InMemoryPetRepository {
    pets: RwLock<HashMap<String, Pet>>,
}

impl InMemoryPetRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PetRepository for InMemoryPetRepository {

    async fn find_all(&self) -> Result<Vec<Pet>, ApiError> {
        let pets = self.pets.read().map_err(poisoned)?;
        let mut all: Vec<Pet> = pets.values().cloned().collect();
        // ObjectIds grow monotonically within a process, so they break ties.
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(all)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Pet>, ApiError> {
        let pets = self.pets.read().map_err(poisoned)?;
        Ok(pets.get(&id.to_lowercase()).cloned())
    }

    async fn exists(&self, id: &str) -> Result<bool, ApiError> {
        let pets = self.pets.read().map_err(poisoned)?;
        Ok(pets.contains_key(&id.to_lowercase()))
    }

    async fn insert(&self, pet: NewPet) -> Result<Pet, ApiError> {
        let pet = Pet::create(ObjectId::new().to_hex(), pet, Utc::now());
        let mut pets = self.pets.write().map_err(poisoned)?;
        pets.insert(pet.id.clone(), pet.clone());
        Ok(pet)
    }

    async fn update(&self, id: &str, changes: PetChanges) -> Result<Option<Pet>, ApiError> {
        let mut pets = self.pets.write().map_err(poisoned)?;
        Ok(pets.get_mut(&id.to_lowercase()).map(|pet| {
            pet.apply(changes, Utc::now());
            pet.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<Option<Pet>, ApiError> {
        let mut pets = self.pets.write().map_err(poisoned)?;
        Ok(pets.remove(&id.to_lowercase()))
    }
}
