pub mod config;
pub mod dates;
pub mod errors;
pub mod fields;
pub mod id;

pub use errors::ApiError;
pub use config::AppConfig;
