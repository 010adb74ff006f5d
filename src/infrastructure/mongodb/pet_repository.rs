use async_trait::async_trait;
use chrono::Utc;
use futures::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, DateTime as BsonDateTime, Document};
use mongodb::options::ReturnDocument;
use serde::{Deserialize, Serialize};

use crate::domain::pet::{model::{NewPet, Pet, PetChanges}, repository::PetRepository};
use crate::infrastructure::database::mongo_context::MongoContext;
use crate::infrastructure::mongodb::{from_bson_datetime, parse_object_id, to_bson_datetime};
use crate::utils::errors::ApiError;

pub const PETS_COLLECTION: &str = "pets";

/// Shape of a document in the `pets` collection.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PetDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<BsonDateTime>,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

impl PetDocument {
    fn new(pet: NewPet, now: BsonDateTime) -> Self {
        PetDocument {
            id: ObjectId::new(),
            name: pet.name,
            kind: pet.kind,
            breed: pet.breed,
            birth_date: pet.birth_date.map(to_bson_datetime),
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<PetDocument> for Pet {
    fn from(document: PetDocument) -> Self {
        Pet {
            id: document.id.to_hex(),
            name: document.name,
            kind: document.kind,
            breed: document.breed,
            birth_date: document.birth_date.map(from_bson_datetime),
            created_at: from_bson_datetime(document.created_at),
            updated_at: from_bson_datetime(document.updated_at),
        }
    }
}

/// `$set`/`$unset` update for `changes`. `updatedAt` is always set.
pub fn pet_update_document(changes: &PetChanges, now: BsonDateTime) -> Document {
    let mut set = doc! { "updatedAt": now };
    let mut unset = Document::new();

    if let Some(name) = &changes.name {
        set.insert("name", name.as_str());
    }
    if let Some(kind) = &changes.kind {
        set.insert("type", kind.as_str());
    }
    match &changes.breed {
        Some(Some(breed)) => { set.insert("breed", breed.as_str()); },
        Some(None) => { unset.insert("breed", ""); },
        None => {}
    }
    match changes.birth_date {
        Some(Some(birth_date)) => { set.insert("birthDate", to_bson_datetime(birth_date)); },
        Some(None) => { unset.insert("birthDate", ""); },
        None => {}
    }

    let mut update = doc! { "$set": set };
    if !unset.is_empty() {
        update.insert("$unset", Bson::Document(unset));
    }
    update
}

pub struct MongoPetRepository {
    pets: mongodb::Collection<PetDocument>
}

impl MongoPetRepository {
    pub fn new(context: &MongoContext) -> Self {
        Self {
            pets: context.collection(PETS_COLLECTION)
        }
    }
}

#[async_trait]
impl PetRepository for MongoPetRepository {

    async fn find_all(&self) -> Result<Vec<Pet>, ApiError> {
        let mut cursor = self.pets
            .find(doc! {})
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .await?;
        let mut pets = Vec::new();

        while let Some(doc) = cursor.next().await {
            match doc {
                Ok(pet) => pets.push(pet.into()),
                Err(e) => return Err(ApiError::MongoError(e)),
            }
        }
        Ok(pets)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Pet>, ApiError> {
        let id = parse_object_id(id)?;

        match self.pets.find_one(doc! { "_id": id }).await {
            Ok(pet) => Ok(pet.map(Pet::from)),
            Err(e) => Err(ApiError::MongoError(e))
        }
    }

    async fn exists(&self, id: &str) -> Result<bool, ApiError> {
        let id = parse_object_id(id)?;
        let count = self.pets
            .count_documents(doc! { "_id": id })
            .limit(1)
            .await?;
        Ok(count > 0)
    }

    async fn insert(&self, pet: NewPet) -> Result<Pet, ApiError> {
        let document = PetDocument::new(pet, to_bson_datetime(Utc::now()));
        self.pets.insert_one(&document).await?;
        Ok(document.into())
    }

    async fn update(&self, id: &str, changes: PetChanges) -> Result<Option<Pet>, ApiError> {
        let id = parse_object_id(id)?;
        let update = pet_update_document(&changes, to_bson_datetime(Utc::now()));

        let updated = self.pets
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated.map(Pet::from))
    }

    async fn delete(&self, id: &str) -> Result<Option<Pet>, ApiError> {
        let id = parse_object_id(id)?;
        let removed = self.pets.find_one_and_delete(doc! { "_id": id }).await?;
        Ok(removed.map(Pet::from))
    }
}
