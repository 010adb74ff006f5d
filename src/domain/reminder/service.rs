use std::sync::Arc;

use serde_json::Value;

use crate::domain::pet::{repository::PetRepository, service::invalid_pet_id};
use crate::domain::reminder::model::{Frequency, NewReminder, Reminder, ReminderChanges, ReminderCreateReceive, ReminderPatchReceive};
use crate::domain::reminder::repository::ReminderRepository;
use crate::utils::{dates::parse_date, errors::ApiError, fields::trimmed, id::is_valid_id};

fn invalid_reminder_id() -> ApiError {
    ApiError::InvalidId("Invalid reminderId".to_string())
}

fn reminder_not_found() -> ApiError {
    ApiError::NotFound("Reminder not found".to_string())
}

/// `null`, `false`, `0` and blank strings count as a missing value.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

#[derive(Clone)]
pub struct ReminderService {
    reminders: Arc<dyn ReminderRepository>,
    pets: Arc<dyn PetRepository>,
}

impl ReminderService {
    pub fn new(reminders: Arc<dyn ReminderRepository>, pets: Arc<dyn PetRepository>) -> Self {
        Self { reminders, pets }
    }

    /// Lists reminders soonest first. An empty `pet_id` is the same as none.
    pub async fn list(&self, pet_id: Option<&str>) -> Result<Vec<Reminder>, ApiError> {
        let pet_id = pet_id.filter(|id| !id.is_empty());

        if let Some(id) = pet_id {
            if !is_valid_id(id) {
                return Err(invalid_pet_id());
            }
        }

        self.reminders.find_all(pet_id).await
    }

    pub async fn get(&self, id: &str) -> Result<Reminder, ApiError> {
        if !is_valid_id(id) {
            return Err(invalid_reminder_id());
        }

        self.reminders
            .find_by_id(id)
            .await?
            .ok_or_else(reminder_not_found)
    }

    /// Creates a reminder for an existing pet.
    ///
    /// The pet lookup and the insert are separate store calls; a pet deleted
    /// in between leaves the reminder pointing at a missing pet.
    pub async fn create(&self, input: ReminderCreateReceive) -> Result<Reminder, ApiError> {
        let pet_id = input.pet_id.filter(|id| !id.is_empty());
        let title = trimmed(input.title);
        let due_at = input.due_at.filter(|value| !is_blank(value));

        let (pet_id, title, due_at) = match (pet_id, title, due_at) {
            (Some(pet_id), Some(title), Some(due_at)) => (pet_id, title, due_at),
            _ => {
                return Err(ApiError::ValidationError(
                    "Fields 'petId', 'title', and 'dueAt' are required".to_string(),
                ))
            }
        };

        if !is_valid_id(&pet_id) {
            return Err(invalid_pet_id());
        }

        if !self.pets.exists(&pet_id).await? {
            return Err(ApiError::ValidationError("Invalid petId (pet does not exist)".to_string()));
        }

        let due_at = parse_date(&due_at)
            .ok_or_else(|| ApiError::ValidationError("'dueAt' must be a valid date".to_string()))?;

        let frequency = match trimmed(input.frequency) {
            Some(raw) => raw.parse::<Frequency>().map_err(|_| {
                ApiError::ValidationError("'frequency' must be one of once, daily, weekly, monthly".to_string())
            })?,
            None => Frequency::default(),
        };

        let reminder = NewReminder {
            pet_id,
            title,
            due_at,
            frequency,
        };

        self.reminders.insert(reminder).await
    }

    /// Applies the whitelisted fields of `patch`. An unparseable `dueAt` is
    /// dropped without failing the rest of the patch.
    pub async fn update(&self, id: &str, patch: ReminderPatchReceive) -> Result<Reminder, ApiError> {
        if !is_valid_id(id) {
            return Err(invalid_reminder_id());
        }

        let title = match patch.title {
            Some(title) => Some(trimmed(Some(title)).ok_or_else(|| {
                ApiError::ValidationError("'title' cannot be empty".to_string())
            })?),
            None => None,
        };

        let changes = ReminderChanges {
            title,
            due_at: patch.due_at.as_ref().and_then(parse_date),
            frequency: patch.frequency,
            completed: patch.completed,
        };

        self.reminders
            .update(id, changes)
            .await?
            .ok_or_else(reminder_not_found)
    }

    pub async fn delete(&self, id: &str) -> Result<String, ApiError> {
        if !is_valid_id(id) {
            return Err(invalid_reminder_id());
        }

        self.reminders
            .delete(id)
            .await?
            .map(|reminder| reminder.id)
            .ok_or_else(reminder_not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use crate::domain::pet::model::{NewPet, Pet, PetChanges};
    use crate::infrastructure::memory::{InMemoryPetRepository, InMemoryReminderRepository};

    const MISSING_ID: &str = "507f1f77bcf86cd799439011";

    struct Fixture {
        pets: Arc<InMemoryPetRepository>,
        service: ReminderService,
    }

    impl Fixture {
        fn new() -> Self {
            let pets = Arc::new(InMemoryPetRepository::new());
            let service = ReminderService::new(Arc::new(InMemoryReminderRepository::new()), pets.clone());
            Self { pets, service }
        }

        async fn pet(&self, name: &str) -> String {
            self.pets
                .insert(NewPet { name: name.into(), kind: "Dog".into(), breed: None, birth_date: None })
                .await
                .unwrap()
                .id
        }

        async fn reminder(&self, pet_id: &str, title: &str, due_at: &str) -> Reminder {
            self.service
                .create(input(json!({ "petId": pet_id, "title": title, "dueAt": due_at })))
                .await
                .unwrap()
        }
    }

    fn input(value: Value) -> ReminderCreateReceive {
        serde_json::from_value(value).unwrap()
    }

    fn patch(value: Value) -> ReminderPatchReceive {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let fx = Fixture::new();
        let pet_id = fx.pet("Fido").await;

        let reminder = fx.reminder(&pet_id, " Vet ", "2030-01-01T00:00:00Z").await;

        assert!(is_valid_id(&reminder.id));
        assert_eq!(reminder.pet_id, pet_id);
        assert_eq!(reminder.title, "Vet");
        assert_eq!(reminder.due_at, Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(reminder.frequency, Frequency::Once);
        assert!(!reminder.completed);
    }

    #[tokio::test]
    async fn test_create_with_frequency() {
        let fx = Fixture::new();
        let pet_id = fx.pet("Fido").await;

        let reminder = fx.service.create(input(json!({
            "petId": pet_id, "title": "Walk", "dueAt": "2030-01-01", "frequency": "daily"
        }))).await.unwrap();
        assert_eq!(reminder.frequency, Frequency::Daily);

        let result = fx.service.create(input(json!({
            "petId": pet_id, "title": "Walk", "dueAt": "2030-01-01", "frequency": "hourly"
        }))).await;
        assert!(matches!(result, Err(ApiError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_create_requires_fields() {
        let fx = Fixture::new();
        let pet_id = fx.pet("Fido").await;

        for body in [
            json!({ "title": "Vet", "dueAt": "2030-01-01" }),
            json!({ "petId": pet_id, "dueAt": "2030-01-01" }),
            json!({ "petId": pet_id, "title": "Vet" }),
            json!({ "petId": "", "title": "Vet", "dueAt": "2030-01-01" }),
            json!({ "petId": pet_id, "title": "  ", "dueAt": "2030-01-01" }),
            json!({ "petId": pet_id, "title": "Vet", "dueAt": null }),
        ] {
            let result = fx.service.create(input(body)).await;
            assert!(matches!(result, Err(ApiError::ValidationError(_))));
        }
    }

    #[tokio::test]
    async fn test_create_treats_falsy_due_date_as_missing() {
        let fx = Fixture::new();
        let pet_id = fx.pet("Fido").await;

        for due_at in [json!(0), json!(false), json!("  ")] {
            let result = fx.service.create(input(json!({
                "petId": pet_id, "title": "Vet", "dueAt": due_at
            }))).await;

            match result {
                Err(ApiError::ValidationError(message)) => {
                    assert_eq!(message, "Fields 'petId', 'title', and 'dueAt' are required")
                }
                other => panic!("expected validation error, got {:?}", other),
            }
        }

        let reminder = fx.service.create(input(json!({
            "petId": pet_id, "title": "Vet", "dueAt": 1_893_456_000_000_i64
        }))).await.unwrap();
        assert_eq!(reminder.due_at, Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_pet_id() {
        let fx = Fixture::new();

        let result = fx.service.create(input(json!({
            "petId": "abc", "title": "Vet", "dueAt": "2030-01-01"
        }))).await;

        assert!(matches!(result, Err(ApiError::InvalidId(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_pet() {
        let fx = Fixture::new();

        let result = fx.service.create(input(json!({
            "petId": MISSING_ID, "title": "Vet", "dueAt": "2030-01-01T00:00:00Z", "frequency": "weekly"
        }))).await;

        match result {
            Err(ApiError::ValidationError(message)) => assert!(message.contains("pet does not exist")),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(fx.service.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_bad_due_date() {
        let fx = Fixture::new();
        let pet_id = fx.pet("Fido").await;

        let result = fx.service.create(input(json!({
            "petId": pet_id, "title": "Vet", "dueAt": "tomorrow-ish"
        }))).await;

        match result {
            Err(ApiError::ValidationError(message)) => assert_eq!(message, "'dueAt' must be a valid date"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_sorted_by_due_date_and_filtered() {
        let fx = Fixture::new();
        let fido = fx.pet("Fido").await;
        let tom = fx.pet("Tom").await;

        let late = fx.reminder(&fido, "Late", "2031-01-01T00:00:00Z").await;
        let early = fx.reminder(&tom, "Early", "2029-01-01T00:00:00Z").await;
        let middle = fx.reminder(&fido, "Middle", "2030-01-01T00:00:00Z").await;

        let all: Vec<String> = fx.service.list(None).await.unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(all, vec![early.id.clone(), middle.id.clone(), late.id.clone()]);

        let for_fido: Vec<String> = fx.service.list(Some(&fido)).await.unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(for_fido, vec![middle.id, late.id]);

        assert_eq!(fx.service.list(Some("")).await.unwrap().len(), 3);
        assert!(fx.service.list(Some(MISSING_ID)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_rejects_malformed_pet_id() {
        let fx = Fixture::new();
        assert!(matches!(fx.service.list(Some("nope")).await, Err(ApiError::InvalidId(_))));
    }

    struct UnreachablePets;

    #[async_trait]
    impl PetRepository for UnreachablePets {
        async fn find_all(&self) -> Result<Vec<Pet>, ApiError> {
            Err(ApiError::InternalError("store touched".into()))
        }
        async fn find_by_id(&self, _id: &str) -> Result<Option<Pet>, ApiError> {
            Err(ApiError::InternalError("store touched".into()))
        }
        async fn exists(&self, _id: &str) -> Result<bool, ApiError> {
            Err(ApiError::InternalError("store touched".into()))
        }
        async fn insert(&self, _pet: NewPet) -> Result<Pet, ApiError> {
            Err(ApiError::InternalError("store touched".into()))
        }
        async fn update(&self, _id: &str, _changes: PetChanges) -> Result<Option<Pet>, ApiError> {
            Err(ApiError::InternalError("store touched".into()))
        }
        async fn delete(&self, _id: &str) -> Result<Option<Pet>, ApiError> {
            Err(ApiError::InternalError("store touched".into()))
        }
    }

    struct UnreachableReminders;

    #[async_trait]
    impl ReminderRepository for UnreachableReminders {
        async fn find_all(&self, _pet_id: Option<&str>) -> Result<Vec<Reminder>, ApiError> {
            Err(ApiError::InternalError("store touched".into()))
        }
        async fn find_by_id(&self, _id: &str) -> Result<Option<Reminder>, ApiError> {
            Err(ApiError::InternalError("store touched".into()))
        }
        async fn insert(&self, _reminder: NewReminder) -> Result<Reminder, ApiError> {
            Err(ApiError::InternalError("store touched".into()))
        }
        async fn update(&self, _id: &str, _changes: ReminderChanges) -> Result<Option<Reminder>, ApiError> {
            Err(ApiError::InternalError("store touched".into()))
        }
        async fn delete(&self, _id: &str) -> Result<Option<Reminder>, ApiError> {
            Err(ApiError::InternalError("store touched".into()))
        }
    }

    #[tokio::test]
    async fn test_malformed_ids_never_reach_the_stores() {
        let service = ReminderService::new(Arc::new(UnreachableReminders), Arc::new(UnreachablePets));

        for id in ["123", "zzzzzzzzzzzzzzzzzzzzzzzz", "507f1f77bcf86cd7994390111"] {
            assert!(matches!(service.list(Some(id)).await, Err(ApiError::InvalidId(_))));
            assert!(matches!(service.get(id).await, Err(ApiError::InvalidId(_))));
            assert!(matches!(service.update(id, patch(json!({ "completed": true }))).await, Err(ApiError::InvalidId(_))));
            assert!(matches!(service.delete(id).await, Err(ApiError::InvalidId(_))));

            let created = service.create(input(json!({ "petId": id, "title": "Vet", "dueAt": "2030-01-01" }))).await;
            assert!(matches!(created, Err(ApiError::InvalidId(_))));
        }
    }

    #[tokio::test]
    async fn test_malformed_and_missing_ids() {
        let fx = Fixture::new();

        assert!(matches!(fx.service.get("xyz").await, Err(ApiError::InvalidId(_))));
        assert!(matches!(fx.service.update("xyz", ReminderPatchReceive::default()).await, Err(ApiError::InvalidId(_))));
        assert!(matches!(fx.service.delete("xyz").await, Err(ApiError::InvalidId(_))));

        assert!(matches!(fx.service.get(MISSING_ID).await, Err(ApiError::NotFound(_))));
        assert!(matches!(fx.service.update(MISSING_ID, patch(json!({ "completed": true }))).await, Err(ApiError::NotFound(_))));
        assert!(matches!(fx.service.delete(MISSING_ID).await, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_due_date_when_unparseable() {
        let fx = Fixture::new();
        let pet_id = fx.pet("Fido").await;
        let reminder = fx.reminder(&pet_id, "Vet", "2030-01-01T00:00:00Z").await;

        let updated = fx.service.update(&reminder.id, patch(json!({
            "title": "Vet checkup", "dueAt": "garbage"
        }))).await.unwrap();

        assert_eq!(updated.title, "Vet checkup");
        assert_eq!(updated.due_at, reminder.due_at);
    }

    #[tokio::test]
    async fn test_update_whitelist() {
        let fx = Fixture::new();
        let fido = fx.pet("Fido").await;
        let tom = fx.pet("Tom").await;
        let reminder = fx.reminder(&fido, "Vet", "2030-01-01T00:00:00Z").await;

        let updated = fx.service.update(&reminder.id, patch(json!({
            "petId": tom,
            "completed": true,
            "frequency": "monthly",
            "dueAt": "2030-02-01T10:00:00Z",
            "notes": "bring papers"
        }))).await.unwrap();

        assert_eq!(updated.pet_id, fido);
        assert!(updated.completed);
        assert_eq!(updated.frequency, Frequency::Monthly);
        assert_eq!(updated.due_at, Utc.with_ymd_and_hms(2030, 2, 1, 10, 0, 0).unwrap());

        let stored = serde_json::to_value(fx.service.get(&reminder.id).await.unwrap()).unwrap();
        assert!(stored.get("notes").is_none());
    }

    #[tokio::test]
    async fn test_update_rejects_blank_title() {
        let fx = Fixture::new();
        let pet_id = fx.pet("Fido").await;
        let reminder = fx.reminder(&pet_id, "Vet", "2030-01-01T00:00:00Z").await;

        let result = fx.service.update(&reminder.id, patch(json!({ "title": " " }))).await;
        assert!(matches!(result, Err(ApiError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_reminders_outlive_their_pet() {
        let fx = Fixture::new();
        let pet_id = fx.pet("Fido").await;
        let reminder = fx.reminder(&pet_id, "Vet", "2030-01-01T00:00:00Z").await;

        fx.pets.delete(&pet_id).await.unwrap();

        assert_eq!(fx.service.get(&reminder.id).await.unwrap().id, reminder.id);

        let result = fx.service.create(input(json!({
            "petId": pet_id, "title": "Another", "dueAt": "2030-01-01"
        }))).await;
        assert!(matches!(result, Err(ApiError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_delete() {
        let fx = Fixture::new();
        let pet_id = fx.pet("Fido").await;
        let reminder = fx.reminder(&pet_id, "Vet", "2030-01-01T00:00:00Z").await;

        assert_eq!(fx.service.delete(&reminder.id).await.unwrap(), reminder.id);
        assert!(matches!(fx.service.get(&reminder.id).await, Err(ApiError::NotFound(_))));
    }
}
