pub mod pet_repository;
pub mod reminder_repository;

pub use pet_repository::MongoPetRepository;
pub use reminder_repository::MongoReminderRepository;

use chrono::{DateTime, Utc};
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};

use crate::utils::errors::ApiError;

pub(crate) fn parse_object_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::InvalidId(format!("Invalid id: {}", id)))
}

/// BSON datetimes keep millisecond precision; anything finer is dropped.
pub(crate) fn to_bson_datetime(value: DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(value.timestamp_millis())
}

pub(crate) fn from_bson_datetime(value: BsonDateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}
