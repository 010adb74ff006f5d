use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;

use crate::domain::reminder::{model::{NewReminder, Reminder, ReminderChanges}, repository::ReminderRepository};
use crate::infrastructure::memory::poisoned;
use crate::utils::errors::ApiError;

#[derive(Default)]
pub struct InMemoryReminderRepository {
    reminders: RwLock<HashMap<String, Reminder>>,
}

impl InMemoryReminderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReminderRepository for InMemoryReminderRepository {

    async fn find_all(&self, pet_id: Option<&str>) -> Result<Vec<Reminder>, ApiError> {
        let pet_id = pet_id.map(str::to_lowercase);
        let reminders = self.reminders.read().map_err(poisoned)?;

        let mut matching: Vec<Reminder> = reminders
            .values()
            .filter(|reminder| pet_id.as_deref().map_or(true, |id| reminder.pet_id == id))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.due_at.cmp(&b.due_at).then_with(|| a.id.cmp(&b.id)));
        Ok(matching)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Reminder>, ApiError> {
        let reminders = self.reminders.read().map_err(poisoned)?;
        Ok(reminders.get(&id.to_lowercase()).cloned())
    }

    async fn insert(&self, reminder: NewReminder) -> Result<Reminder, ApiError> {
        let mut reminder = Reminder::create(ObjectId::new().to_hex(), reminder, Utc::now());
        // Stored ids are lowercase hex, matching what MongoDB hands back.
        reminder.pet_id = reminder.pet_id.to_lowercase();

        let mut reminders = self.reminders.write().map_err(poisoned)?;
        reminders.insert(reminder.id.clone(), reminder.clone());
        Ok(reminder)
    }

    async fn update(&self, id: &str, changes: ReminderChanges) -> Result<Option<Reminder>, ApiError> {
        let mut reminders = self.reminders.write().map_err(poisoned)?;
        Ok(reminders.get_mut(&id.to_lowercase()).map(|reminder| {
            reminder.apply(changes, Utc::now());
            reminder.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<Option<Reminder>, ApiError> {
        let mut reminders = self.reminders.write().map_err(poisoned)?;
        Ok(reminders.remove(&id.to_lowercase()))
    }
}
