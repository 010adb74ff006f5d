//! Process-local stores with the same ordering and atomicity guarantees as
//! the MongoDB repositories. Used by the test suite and for running the API
//! without a database.

pub mod pet_repository;
pub mod reminder_repository;

pub use pet_repository::InMemoryPetRepository;
pub use reminder_repository::InMemoryReminderRepository;

use crate::utils::errors::ApiError;

pub(crate) fn poisoned<T>(_: T) -> ApiError {
    ApiError::InternalError("in-memory store lock poisoned".to_string())
}
