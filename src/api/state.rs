use std::sync::Arc;

use crate::domain::{pet::{repository::PetRepository, service::PetService}, reminder::{repository::ReminderRepository, service::ReminderService}};
use crate::infrastructure::{database::mongo_context::MongoContext, memory::{InMemoryPetRepository, InMemoryReminderRepository}, mongodb::{MongoPetRepository, MongoReminderRepository}};

#[derive(Clone)]
pub struct AppState {
    pub pets: PetService,
    pub reminders: ReminderService,
    pub service_name: String,
}

impl AppState {
    pub fn new(
        pet_repo: Arc<dyn PetRepository>,
        reminder_repo: Arc<dyn ReminderRepository>,
        service_name: impl Into<String>
    ) -> Self {
        AppState {
            pets: PetService::new(pet_repo.clone()),
            reminders: ReminderService::new(reminder_repo, pet_repo),
            service_name: service_name.into(),
        }
    }

    pub fn mongo(context: &MongoContext, service_name: impl Into<String>) -> Self {
        Self::new(
            Arc::new(MongoPetRepository::new(context)),
            Arc::new(MongoReminderRepository::new(context)),
            service_name
        )
    }

    pub fn in_memory(service_name: impl Into<String>) -> Self {
        Self::new(
            Arc::new(InMemoryPetRepository::new()),
            Arc::new(InMemoryReminderRepository::new()),
            service_name
        )
    }
}
