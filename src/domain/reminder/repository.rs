use async_trait::async_trait;

use crate::{domain::reminder::model::{NewReminder, Reminder, ReminderChanges}, utils::errors::ApiError};

#[async_trait]
pub trait ReminderRepository: Send + Sync {
    /// Reminders sorted by `due_at` ascending, restricted to one pet when
    /// `pet_id` is given.
    async fn find_all(&self, pet_id: Option<&str>) -> Result<Vec<Reminder>, ApiError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Reminder>, ApiError>;
    async fn insert(&self, reminder: NewReminder) -> Result<Reminder, ApiError>;
    async fn update(&self, id: &str, changes: ReminderChanges) -> Result<Option<Reminder>, ApiError>;
    async fn delete(&self, id: &str) -> Result<Option<Reminder>, ApiError>;
}
