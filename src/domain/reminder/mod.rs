pub mod model;
pub mod repository;
pub mod service;

pub use model::{Frequency, NewReminder, Reminder, ReminderChanges, ReminderCreateReceive, ReminderPatchReceive};
pub use repository::ReminderRepository;
pub use service::ReminderService;
