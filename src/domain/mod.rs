pub mod pet;
pub mod reminder;
