use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use serde_json::Value;

use crate::utils::fields::nullable;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /pets`. Fields stay loosely typed so that missing or
/// malformed values surface as validation errors from the service.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PetCreateReceive {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub breed: Option<String>,
    pub birth_date: Option<Value>,
}

/// Body of `PATCH /pets/{id}`. Only these keys are read; anything else in
/// the request is ignored.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PetPatchReceive {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub breed: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub birth_date: Option<Option<Value>>,
}

/// A validated pet ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPet {
    pub name: String,
    pub kind: String,
    pub breed: Option<String>,
    pub birth_date: Option<DateTime<Utc>>,
}

/// Validated field changes for an existing pet. `Some(None)` clears an
/// optional field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetChanges {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub breed: Option<Option<String>>,
    pub birth_date: Option<Option<DateTime<Utc>>>,
}

impl Pet {
    /// Builds the stored record for `new_pet`; both timestamps are `now`.
    pub fn create(id: String, new_pet: NewPet, now: DateTime<Utc>) -> Self {
        Pet {
            id,
            name: new_pet.name,
            kind: new_pet.kind,
            breed: new_pet.breed,
            birth_date: new_pet.birth_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies `changes` and refreshes `updated_at`.
    pub fn apply(&mut self, changes: PetChanges, now: DateTime<Utc>) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(kind) = changes.kind {
            self.kind = kind;
        }
        if let Some(breed) = changes.breed {
            self.breed = breed;
        }
        if let Some(birth_date) = changes.birth_date {
            self.birth_date = birth_date;
        }
        self.updated_at = now;
    }
}
