pub mod database;
pub mod memory;
pub mod mongodb;

pub use database::mongo_context;
