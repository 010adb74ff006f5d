use async_trait::async_trait;
use chrono::Utc;
use futures::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime, Document};
use mongodb::options::ReturnDocument;
use mongodb::IndexModel;
use serde::{Deserialize, Serialize};

use crate::domain::reminder::{model::{Frequency, NewReminder, Reminder, ReminderChanges}, repository::ReminderRepository};
use crate::infrastructure::database::mongo_context::MongoContext;
use crate::infrastructure::mongodb::{from_bson_datetime, parse_object_id, to_bson_datetime};
use crate::utils::errors::ApiError;

pub const REMINDERS_COLLECTION: &str = "reminders";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub pet_id: ObjectId,
    pub title: String,
    pub due_at: BsonDateTime,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default)]
    pub completed: bool,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

impl ReminderDocument {
    fn new(reminder: NewReminder, now: BsonDateTime) -> Result<Self, ApiError> {
        Ok(ReminderDocument {
            id: ObjectId::new(),
            pet_id: parse_object_id(&reminder.pet_id)?,
            title: reminder.title,
            due_at: to_bson_datetime(reminder.due_at),
            frequency: reminder.frequency,
            completed: false,
            created_at: now,
            updated_at: now,
        })
    }
}

impl From<ReminderDocument> for Reminder {
    fn from(document: ReminderDocument) -> Self {
        Reminder {
            id: document.id.to_hex(),
            pet_id: document.pet_id.to_hex(),
            title: document.title,
            due_at: from_bson_datetime(document.due_at),
            frequency: document.frequency,
            completed: document.completed,
            created_at: from_bson_datetime(document.created_at),
            updated_at: from_bson_datetime(document.updated_at),
        }
    }
}

pub fn reminder_update_document(changes: &ReminderChanges, now: BsonDateTime) -> Document {
    let mut set = doc! { "updatedAt": now };

    if let Some(title) = &changes.title {
        set.insert("title", title.as_str());
    }
    if let Some(due_at) = changes.due_at {
        set.insert("dueAt", to_bson_datetime(due_at));
    }
    if let Some(frequency) = changes.frequency {
        set.insert("frequency", frequency.as_str());
    }
    if let Some(completed) = changes.completed {
        set.insert("completed", completed);
    }

    doc! { "$set": set }
}

pub struct MongoReminderRepository {
    reminders: mongodb::Collection<ReminderDocument>
}

impl MongoReminderRepository {
    pub fn new(context: &MongoContext) -> Self {
        Self {
            reminders: context.collection(REMINDERS_COLLECTION)
        }
    }

    /// Creates the lookup indexes used by listing. Safe to call on every start.
    pub async fn ensure_indexes(&self) -> Result<(), ApiError> {
        let indexes = vec![
            IndexModel::builder().keys(doc! { "petId": 1 }).build(),
            IndexModel::builder().keys(doc! { "dueAt": 1 }).build(),
            IndexModel::builder().keys(doc! { "petId": 1, "dueAt": 1 }).build(),
        ];
        self.reminders.create_indexes(indexes).await?;
        Ok(())
    }
}

#[async_trait]
impl ReminderRepository for MongoReminderRepository {

    async fn find_all(&self, pet_id: Option<&str>) -> Result<Vec<Reminder>, ApiError> {
        let filter = match pet_id {
            Some(pet_id) => {
                let pet_id = parse_object_id(pet_id)?;
                doc! { "petId": pet_id }
            },
            None => doc! {},
        };

        let mut cursor = self.reminders
            .find(filter)
            .sort(doc! { "dueAt": 1, "_id": 1 })
            .await?;
        let mut reminders = Vec::new();

        while let Some(doc) = cursor.next().await {
            match doc {
                Ok(reminder) => reminders.push(reminder.into()),
                Err(e) => return Err(ApiError::MongoError(e)),
            }
        }
        Ok(reminders)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Reminder>, ApiError> {
        let id = parse_object_id(id)?;

        match self.reminders.find_one(doc! { "_id": id }).await {
            Ok(reminder) => Ok(reminder.map(Reminder::from)),
            Err(e) => Err(ApiError::MongoError(e))
        }
    }

    async fn insert(&self, reminder: NewReminder) -> Result<Reminder, ApiError> {
        let document = ReminderDocument::new(reminder, to_bson_datetime(Utc::now()))?;
        self.reminders.insert_one(&document).await?;
        Ok(document.into())
    }

    async fn update(&self, id: &str, changes: ReminderChanges) -> Result<Option<Reminder>, ApiError> {
        let id = parse_object_id(id)?;
        let update = reminder_update_document(&changes, to_bson_datetime(Utc::now()));

        let updated = self.reminders
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated.map(Reminder::from))
    }

    async fn delete(&self, id: &str) -> Result<Option<Reminder>, ApiError> {
        let id = parse_object_id(id)?;
        let removed = self.reminders.find_one_and_delete(doc! { "_id": id }).await?;
        Ok(removed.map(Reminder::from))
    }
}
