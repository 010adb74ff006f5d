pub mod health_handlers;
pub mod pet_handlers;
pub mod reminder_handlers;
